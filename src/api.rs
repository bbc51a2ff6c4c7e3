//! Settings API: transport-free request handlers.
//!
//! ```text
//!   GET  /userSettings   ──▶ 200 settings document
//!   PUT  /userSettings   ──▶ 200 updated document | 400 error, unchanged
//!   GET  /internalState  ──▶ 200 internal-state document
//!   OPTIONS *            ──▶ 204
//!   anything else        ──▶ 404
//! ```
//!
//! Handlers take the body as a string and return an [`ApiResponse`]; an
//! HTTP server (or a test) only has to move bytes.  Routing lives with the
//! transport.

use log::debug;
use serde::Serialize;

use crate::app::commands::AppCommand;
use crate::app::ports::EventSink;
use crate::app::service::ControlService;
use crate::schedule::Moment;
use crate::settings::{SettingsPatch, SettingsStore};

/// Request methods the handlers distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Options,
    Other,
}

/// Status code plus JSON body (empty for 204).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn error(status: u16, message: &'static str) -> Self {
        let body = serde_json::to_string(&ErrorBody {
            code: status,
            message,
        })
        .unwrap_or_default();
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: &'static str,
}

pub fn get_user_settings(settings: &SettingsStore) -> ApiResponse {
    ApiResponse::ok(settings.to_document().to_json())
}

/// Parse, validate and apply a settings edit.  Any failure leaves `settings`
/// exactly as it was and answers 400.
pub fn put_user_settings(
    service: &ControlService,
    settings: &mut SettingsStore,
    body: &str,
    sink: &mut impl EventSink,
) -> ApiResponse {
    let patch = match SettingsPatch::from_json(body) {
        Ok(p) => p,
        Err(e) => {
            debug!("PUT /userSettings: {}", e);
            return ApiResponse::error(400, "Invalid user settings");
        }
    };
    match service.handle_command(AppCommand::UpdateSettings(patch), settings, sink) {
        Ok(()) => get_user_settings(settings),
        Err(_) => ApiResponse::error(400, "Invalid user settings"),
    }
}

/// `now` is the wall-clock time of the request; `None` before the clock syncs.
pub fn get_internal_state(service: &ControlService, now: Option<&Moment>) -> ApiResponse {
    ApiResponse::ok(service.internal_state(now).to_json())
}

/// Fallback for unrouted requests.
pub fn not_found(method: Method) -> ApiResponse {
    if method == Method::Options {
        ApiResponse {
            status: 204,
            body: String::new(),
        }
    } else {
        ApiResponse::error(404, "Not Found")
    }
}
