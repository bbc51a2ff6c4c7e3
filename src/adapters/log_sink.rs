//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events through
//! the `log` facade (the binary routes them to stderr).  A dashboard or MQTT
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

fn fmt_celsius(v: Option<f32>) -> String {
    v.map_or_else(|| "--".to_owned(), |c| format!("{c:.2}\u{00b0}C"))
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | init={} | T={} | target={} | heater={:?} | sensor={} | ticks={}",
                    t.initialized,
                    fmt_celsius(t.temperature_c),
                    fmt_celsius(t.target_c),
                    t.heater,
                    if t.sensor_connected { "OK" } else { "LOST" },
                    t.tick_count,
                );
            }
            AppEvent::Started(address) => {
                info!("START | sensor={}", address);
            }
            AppEvent::InitFailed(e) => {
                warn!("START | sensor init failed: {}", e);
            }
            AppEvent::HeaterChanged { from, to } => {
                info!("HEATER | {:?} -> {:?}", from, to);
            }
            AppEvent::TargetChanged { from, to, source } => {
                info!(
                    "TARGET | {} -> {:.2}\u{00b0}C ({:?})",
                    fmt_celsius(*from),
                    to,
                    source
                );
            }
            AppEvent::SensorLost => {
                warn!("SENSOR | disconnected, holding last reading");
            }
            AppEvent::SensorRestored(c) => {
                info!("SENSOR | restored at {:.2}\u{00b0}C", c);
            }
            AppEvent::ClockWrapped { now_ms } => {
                info!("CLOCK | monotonic wrap, re-anchored at {} ms", now_ms);
            }
            AppEvent::SettingsUpdated => {
                info!("SETTINGS | updated");
            }
            AppEvent::SettingsRejected(e) => {
                warn!("SETTINGS | rejected: {}", e);
            }
        }
    }
}
