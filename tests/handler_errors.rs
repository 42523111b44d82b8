mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use pulsemetry::routes::router;

#[tokio::test]
async fn test_unknown_route_returns_error_body() {
    let (state, _store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/no/such/route").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_missing_query_param_returns_error_body() {
    let (state, _store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.get("/api/analytics/event-summary").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "bad_request");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("event")
    );
}

#[tokio::test]
async fn test_malformed_json_body_returns_error_body() {
    let (state, _store, _cache) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/auth/register")
        .bytes("{not json".into())
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_rate_limit_covers_non_api_routes() {
    let (state, _store, _cache) = common::create_test_state();

    let app = router(state, true, 1, 2);
    let mut server = TestServer::new(app).unwrap();
    server.add_header(
        HeaderName::from_static("x-forwarded-for"),
        HeaderValue::from_static("203.0.113.77"),
    );

    server.get("/health").await.assert_status_ok();
    server.get("/health").await.assert_status_ok();

    let throttled = server.get("/health").await;
    throttled.assert_status(StatusCode::TOO_MANY_REQUESTS);
}
