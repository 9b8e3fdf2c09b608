use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use encore_chat::{routes, ChatError, ChatProxyClient, ChatSession, ChatTransport, SendOutcome};
use encore_config::{AppConfig, ChatConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(base_url: &str, api_key: Option<&str>) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        use_chat: true,
        chat: Some(ChatConfig {
            api_base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            system_prompt: "You answer questions about the artist.".to_string(),
            max_tokens: Some(200),
        }),
        ..AppConfig::default()
    })
}

async fn post_chat(config: Arc<AppConfig>, message: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "message": message }).to_string()))
        .unwrap();
    let response = routes(config).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

#[tokio::test]
async fn message_is_forwarded_with_system_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 200,
            "messages": [
                { "role": "system", "content": "You answer questions about the artist." },
                { "role": "user", "content": "When is the next show?" }
            ]
        })))
        .respond_with(completion("Saturday at 9pm."))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_chat(
        config_for(&server.uri(), Some("sk-test")),
        "  When is the next show?  ",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "response": "Saturday at 9pm." }));
}

#[tokio::test]
async fn out_of_bounds_messages_are_rejected_before_upstream() {
    let server = MockServer::start().await;
    let config = config_for(&server.uri(), Some("sk-test"));

    let (status, body) = post_chat(config.clone(), " ? ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message is too short");

    let (status, _) = post_chat(config, &"a".repeat(501)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_api_key_is_a_server_error() {
    let server = MockServer::start().await;

    let (status, body) = post_chat(config_for(&server.uri(), None), "Hello there").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Chat API key is not configured");
}

#[tokio::test]
async fn upstream_failure_is_a_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let (status, _) = post_chat(config_for(&server.uri(), Some("sk-test")), "Hello there").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn proxy_client_reads_reply_and_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "message": "ping" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "pong" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({ "message": "boom" })))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({ "error": "Chat API error: status 500" })),
        )
        .mount(&server)
        .await;

    let client = ChatProxyClient::new(format!("{}/api/chat", server.uri()));

    assert_eq!(client.send("ping").await.unwrap(), "pong");
    assert_eq!(
        client.send("boom").await.unwrap_err(),
        ChatError::Upstream("Chat API error: status 500".to_string())
    );
}

#[tokio::test]
async fn session_over_proxy_client_records_the_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Sure!" })))
        .mount(&server)
        .await;

    let session = ChatSession::new(ChatProxyClient::new(format!("{}/api/chat", server.uri())));
    let outcome = session.send("Can I book you?").await.unwrap();

    assert!(matches!(outcome, SendOutcome::Replied(ref m) if m.is_bot && m.text == "Sure!"));
    assert_eq!(session.transcript().len(), 3);
}
