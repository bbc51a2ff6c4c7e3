//! Settings API handlers against a live store and control service.

use super::mock_hw::{LogSink, MockClock, MockHardware, monday};

use thermite::api::{self, Method};
use thermite::app::events::AppEvent;
use thermite::app::service::ControlService;
use thermite::config::SystemConfig;
use thermite::settings::SettingsStore;

fn fixture() -> (ControlService, SettingsStore, LogSink) {
    (
        ControlService::new(&SystemConfig::default()),
        SettingsStore::default(),
        LogSink::new(),
    )
}

fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}

// ── Rejections ───────────────────────────────────────────────

const REJECTED: &[(&str, &str)] = &[
    ("empty set point name", r#"{"setPoints":[{"name":""},{},{},{}]}"#),
    ("set point too cold", r#"{"setPoints":[{},{"tempTarget":-100},{},{}]}"#),
    ("set point too hot", r#"{"setPoints":[{},{},{},{"tempTarget":100}]}"#),
    ("override too hot", r#"{"tempOverride":30.5}"#),
    ("override start only", r#"{"overrideStart":1000,"overrideEnd":0}"#),
    ("override inverted", r#"{"overrideStart":2000,"overrideEnd":1000}"#),
    ("override negative", r#"{"overrideStart":-5,"overrideEnd":10}"#),
    ("weekly just over", r#"{"weeklySchedule":16384}"#),
    ("weekly past u16", r#"{"weeklySchedule":65536}"#),
    ("weekly negative", r#"{"weeklySchedule":-1}"#),
    (
        "schedule too short",
        r#"{"dailySchedules":[{"schedule":[0,0,0,0,0,0,0,0,0,0,0]},{},{},{}]}"#,
    ),
    (
        "schedule too long",
        r#"{"dailySchedules":[{},{"schedule":[0,0,0,0,0,0,0,0,0,0,0,0,0]},{},{}]}"#,
    ),
    (
        "schedule byte negative",
        r#"{"dailySchedules":[{},{},{"schedule":[0,0,0,0,0,0,0,0,0,0,0,-1]},{}]}"#,
    ),
    (
        "schedule byte too big",
        r#"{"dailySchedules":[{},{},{},{"schedule":[256,0,0,0,0,0,0,0,0,0,0,0]}]}"#,
    ),
    ("schedule not an array", r#"{"dailySchedules":[{"schedule":7},{},{},{}]}"#),
    ("three set points", r#"{"setPoints":[{},{},{}]}"#),
    ("five set points", r#"{"setPoints":[{},{},{},{},{}]}"#),
    ("three daily schedules", r#"{"dailySchedules":[{},{},{}]}"#),
    ("five daily schedules", r#"{"dailySchedules":[{},{},{},{},{}]}"#),
    ("weekly as string", r#"{"weeklySchedule":"0x2002"}"#),
    ("not json", "weeklySchedule=1"),
    ("truncated json", r#"{"weeklySchedule":"#),
];

#[test]
fn every_invalid_body_is_rejected_without_side_effects() {
    let (service, mut settings, mut sink) = fixture();
    let before = api::get_user_settings(&settings).body;

    for (label, body) in REJECTED {
        let resp = api::put_user_settings(&service, &mut settings, body, &mut sink);
        assert_eq!(resp.status, 400, "{label} should be rejected");
        assert_eq!(
            json(&resp.body),
            serde_json::json!({"code": 400, "message": "Invalid user settings"}),
            "{label}"
        );
        assert_eq!(
            api::get_user_settings(&settings).body,
            before,
            "{label} must leave settings untouched"
        );
    }
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SettingsUpdated)), 0);
}

#[test]
fn valid_field_does_not_sneak_past_invalid_sibling() {
    let (service, mut settings, mut sink) = fixture();
    let before = settings.clone();

    let body = r#"{"weeklySchedule":10754,"setPoints":[{"tempTarget":22},{},{},{"tempTarget":31}]}"#;
    let resp = api::put_user_settings(&service, &mut settings, body, &mut sink);

    assert_eq!(resp.status, 400);
    assert_eq!(settings, before);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SettingsRejected(_))), 1);
}

// ── Accepted edits ───────────────────────────────────────────

#[test]
fn valid_put_returns_updated_document() {
    let (service, mut settings, mut sink) = fixture();

    let body = r#"{
        "setPoints": [{"name": "Warm", "tempTarget": 21.5}, {}, {}, {}],
        "dailySchedules": [{}, {"schedule": [0,0,0,0,0,0,0,0,0,0,0,255]}, {}, {"name": "Guests"}],
        "weeklySchedule": 10754
    }"#;
    let resp = api::put_user_settings(&service, &mut settings, body, &mut sink);

    assert_eq!(resp.status, 200);
    let doc = json(&resp.body);
    assert_eq!(doc["setPoints"][0]["name"], "Warm");
    assert_eq!(doc["setPoints"][0]["tempTarget"], 21.5);
    assert_eq!(doc["setPoints"][1]["name"], "Normal");
    assert_eq!(doc["dailySchedules"][1]["schedule"][11], 255);
    assert_eq!(doc["dailySchedules"][3]["name"], "Guests");
    assert_eq!(doc["weeklySchedule"], 0x2a02);
    assert_eq!(resp.body, api::get_user_settings(&settings).body);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SettingsUpdated)), 1);
}

#[test]
fn boundary_values_are_accepted() {
    let (service, mut settings, mut sink) = fixture();

    for body in [
        r#"{"tempOverride":10}"#,
        r#"{"tempOverride":30}"#,
        r#"{"weeklySchedule":16383}"#,
        r#"{"weeklySchedule":0}"#,
        r#"{"overrideStart":0,"overrideEnd":0}"#,
        r#"{"overrideStart":500,"overrideEnd":500}"#,
        "{}",
    ] {
        let resp = api::put_user_settings(&service, &mut settings, body, &mut sink);
        assert_eq!(resp.status, 200, "{body}");
    }
}

#[test]
fn override_window_can_be_moved_one_end_at_a_time() {
    let (service, mut settings, mut sink) = fixture();

    let resp = api::put_user_settings(
        &service,
        &mut settings,
        r#"{"overrideStart":1000,"overrideEnd":2000}"#,
        &mut sink,
    );
    assert_eq!(resp.status, 200);

    // 3000 against the stored start of 1000 is a valid window.
    let resp = api::put_user_settings(&service, &mut settings, r#"{"overrideEnd":3000}"#, &mut sink);
    assert_eq!(resp.status, 200);
    assert_eq!(settings.temp_override().end, 3000);

    // 500 against the stored start of 1000 is inverted.
    let resp = api::put_user_settings(&service, &mut settings, r#"{"overrideEnd":500}"#, &mut sink);
    assert_eq!(resp.status, 400);
    assert_eq!(settings.temp_override().end, 3000);
}

#[test]
fn fetched_document_can_be_put_back_unchanged() {
    let (service, mut settings, mut sink) = fixture();
    let doc = api::get_user_settings(&settings).body;

    let resp = api::put_user_settings(&service, &mut settings, &doc, &mut sink);

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, doc);
}

#[test]
fn put_override_changes_resolved_target() {
    let (service, mut settings, mut sink) = fixture();
    let at = monday(9, 0);
    assert_eq!(settings.resolve_target(&at), 20.0);

    let body = format!(
        r#"{{"tempOverride":25,"overrideStart":{},"overrideEnd":{}}}"#,
        at.timestamp - 60,
        at.timestamp + 60
    );
    let resp = api::put_user_settings(&service, &mut settings, &body, &mut sink);

    assert_eq!(resp.status, 200);
    assert_eq!(settings.resolve_target(&at), 25.0);
    assert_eq!(settings.resolve_target(&monday(9, 2)), 20.0);
}

// ── Internal state ───────────────────────────────────────────

#[test]
fn internal_state_before_start() {
    let (service, _settings, _sink) = fixture();

    let resp = api::get_internal_state(&service, None);

    assert_eq!(resp.status, 200);
    assert_eq!(
        json(&resp.body),
        serde_json::json!({
            "dateTime": null,
            "heater": false,
            "temp": null,
            "tempTarget": null,
            "initialized": false
        })
    );
}

#[test]
fn internal_state_after_ticks() {
    let (mut service, settings, mut sink) = fixture();
    let mut hw = MockHardware::new();
    hw.reading = Ok(18.5);
    let mut clock = MockClock::monday(0, 9, 0);
    service.start(&mut hw, &mut sink).unwrap();

    service.tick(&settings, &mut clock, &mut hw, &mut sink);
    clock.advance_ms(400);
    service.tick(&settings, &mut clock, &mut hw, &mut sink);

    let resp = api::get_internal_state(&service, Some(&monday(9, 0)));
    assert_eq!(
        json(&resp.body),
        serde_json::json!({
            "dateTime": "2021-02-01T09:00:00+00:00",
            "heater": true,
            "temp": 18.5,
            "tempTarget": 20.0,
            "initialized": true
        })
    );
}

// ── Routing fallbacks ────────────────────────────────────────

#[test]
fn options_and_unknown_routes() {
    let resp = api::not_found(Method::Options);
    assert_eq!(resp.status, 204);
    assert!(resp.body.is_empty());

    for method in [Method::Get, Method::Put, Method::Other] {
        let resp = api::not_found(method);
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, r#"{"code":404,"message":"Not Found"}"#);
    }
}
