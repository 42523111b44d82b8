mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_collect_without_key_is_unauthorized() {
    let (state, store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/analytics/collect")
        .json(&json!({"event_name": "ping", "user_id": "u-1"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "unauthorized");

    assert!(store.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_collect_with_unknown_key_is_unauthorized() {
    let (state, _store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/analytics/collect")
        .add_header("x-api-key", "pm_bogus")
        .json(&json!({"event_name": "ping", "user_id": "u-1"}))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_collect_stores_event_with_caller_context() {
    let (state, store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let (app_id, api_key) = common::register_app(&server, "Collector").await;

    let response = server
        .post("/api/analytics/collect")
        .add_header("x-api-key", api_key)
        .add_header("user-agent", "pm-sdk/1.0")
        .json(&json!({
            "event_name": "purchase",
            "user_id": "u-7",
            "device_type": "mobile",
            "os": "iOS",
            "properties": {"amount": 12.5}
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["success"], true);
    let event_id = body["data"]["eventId"].as_str().unwrap();
    assert_eq!(event_id.len(), 32);

    let events = store.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.id, event_id);
    assert_eq!(event.app_id, app_id);
    assert_eq!(event.event_name, "purchase");
    assert_eq!(event.user_id, "u-7");
    assert_eq!(event.device_type.as_deref(), Some("mobile"));
    assert_eq!(event.ip.as_deref(), Some("203.0.113.10"));
    assert_eq!(event.user_agent.as_deref(), Some("pm-sdk/1.0"));

    let properties: serde_json::Value = serde_json::from_str(&event.properties).unwrap();
    assert_eq!(properties["amount"], 12.5);
}

#[tokio::test]
async fn test_collect_blank_event_name_is_bad_request() {
    let (state, store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let (_app_id, api_key) = common::register_app(&server, "Collector").await;

    let response = server
        .post("/api/analytics/collect")
        .add_header("x-api-key", api_key)
        .json(&json!({"event_name": "", "user_id": "u-1"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "bad_request");

    assert!(store.events.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_collect_blank_user_id_is_bad_request() {
    let (state, _store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let (_app_id, api_key) = common::register_app(&server, "Collector").await;

    let response = server
        .post("/api/analytics/collect")
        .add_header("x-api-key", api_key)
        .json(&json!({"event_name": "ping", "user_id": ""}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_collect_client_timestamp_is_kept() {
    let (state, store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let (_app_id, api_key) = common::register_app(&server, "Collector").await;

    server
        .post("/api/analytics/collect")
        .add_header("x-api-key", api_key)
        .json(&json!({
            "event_name": "replayed",
            "user_id": "u-1",
            "timestamp": "2026-08-01T10:00:00Z"
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let events = store.events.lock().unwrap();
    assert_eq!(events[0].event_time.to_rfc3339(), "2026-08-01T10:00:00+00:00");
}
