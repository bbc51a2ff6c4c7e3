//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                    |
//! |----------------|--------------------|--------------------------------|
//! | `clock`        | ClockPort          | System clock + chrono timezone |
//! | `hardware`     | SensorPort         | One-wire thermometer           |
//! |                | HeaterPort         | Relay on an embedded-hal pin   |
//! | `log_sink`     | EventSink          | `log` facade                   |
//!
//! The simulated room in [`crate::sensors::simulated`] implements
//! `SensorPort` and `HeaterPort` directly.

pub mod clock;
pub mod hardware;
pub mod log_sink;
