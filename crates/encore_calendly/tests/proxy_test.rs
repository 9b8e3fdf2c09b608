use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use encore_calendly::routes;
use encore_config::{AppConfig, CalendlyConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_URI: &str = "https://api.calendly.com/users/AAAA";

fn config_for(base_url: &str, token: Option<&str>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        use_calendly: true,
        calendly: Some(CalendlyConfig {
            api_base_url: base_url.to_string(),
            access_token: token.map(str::to_string),
        }),
        ..AppConfig::default()
    })
}

async fn mount_current_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "resource": { "uri": USER_URI, "name": "Awa" }
            })),
        )
        .mount(server)
        .await;
}

async fn send(config: Arc<AppConfig>, request: Request<Body>) -> (StatusCode, Value) {
    let response = routes(config).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn event_types_resolves_the_user_first() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;
    Mock::given(method("GET"))
        .and(path("/event_types"))
        .and(query_param("user", USER_URI))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{ "uri": "et/1", "name": "Consultation", "duration": 30 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        get("/calendly?action=event-types"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["collection"][0]["name"], "Consultation");
}

#[tokio::test]
async fn post_body_action_is_used_when_query_has_none() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/calendly")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"action":"user"}"#))
        .unwrap();
    let (status, body) = send(config_for(&server.uri(), Some("test-token")), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resource"]["uri"], USER_URI);
}

#[tokio::test]
async fn default_action_lists_active_events() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events"))
        .and(query_param("user", USER_URI))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "collection": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(config_for(&server.uri(), Some("test-token")), get("/calendly")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "collection": [] }));
}

#[tokio::test]
async fn availability_without_event_type_is_rejected() {
    let server = MockServer::start().await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        get("/calendly?action=availability"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "event_type_uri parameter required" }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn availability_forwards_explicit_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event_type_available_times"))
        .and(query_param("event_type", "https://api.calendly.com/event_types/ET1"))
        .and(query_param("start_time", "2025-05-01T00:00:00Z"))
        .and(query_param("end_time", "2025-05-08T00:00:00Z"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "collection": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = send(
        config_for(&server.uri(), Some("test-token")),
        get("/calendly?action=availability\
             &event_type_uri=https%3A%2F%2Fapi.calendly.com%2Fevent_types%2FET1\
             &start_time=2025-05-01T00%3A00%3A00Z&end_time=2025-05-08T00%3A00%3A00Z"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_action_is_a_bad_request() {
    let server = MockServer::start().await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        get("/calendly?action=cancel"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid action parameter" }));
}

#[tokio::test]
async fn missing_token_is_a_configuration_error() {
    let server = MockServer::start().await;

    let (status, body) = send(config_for(&server.uri(), None), get("/calendly?action=user")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Configuration error" }));
}

#[tokio::test]
async fn upstream_error_status_is_mirrored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated"))
        .mount(&server)
        .await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        get("/calendly?action=user"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "error": "Calendly API error", "details": "Unauthenticated", "status": 401 })
    );
}

#[tokio::test]
async fn malformed_upstream_body_is_an_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        get("/calendly?action=user"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let server = MockServer::start().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/calendly")
        .header("origin", "https://artist.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "apikey, content-type")
        .body(Body::empty())
        .unwrap();

    let response = routes(config_for(&server.uri(), Some("test-token")))
        .oneshot(request)
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

fn post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn post_without_body_or_query_action_is_an_internal_error() {
    let server = MockServer::start().await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        post("/calendly", ""),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn post_with_an_empty_object_defaults_to_events() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;
    Mock::given(method("GET"))
        .and(path("/scheduled_events"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "collection": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = send(
        config_for(&server.uri(), Some("test-token")),
        post("/calendly", "{}"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn post_query_action_ignores_the_body() {
    let server = MockServer::start().await;
    mount_current_user(&server).await;

    let (status, body) = send(
        config_for(&server.uri(), Some("test-token")),
        post("/calendly?action=user", ""),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resource"]["uri"], USER_URI);
}

#[tokio::test]
async fn missing_token_is_reported_before_a_malformed_body() {
    let server = MockServer::start().await;

    let (status, body) = send(config_for(&server.uri(), None), post("/calendly", "{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Configuration error" }));
}
