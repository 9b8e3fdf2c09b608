// --- File: crates/encore_scheduler/tests/source_test.rs ---
use encore_scheduler::{EventTypeSource, ProxyEventTypeSource, SchedulerError};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer) -> ProxyEventTypeSource {
    ProxyEventTypeSource::with_http(
        reqwest::Client::new(),
        format!("{}/api/calendly", server.uri()),
    )
}

#[tokio::test]
async fn asks_the_proxy_for_event_types() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calendly"))
        .and(body_json(json!({ "action": "event-types" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [
                {
                    "uri": "https://api.calendly.com/event_types/call",
                    "name": "Call",
                    "duration": 15,
                    "scheduling_url": "https://calendly.com/artist/call",
                    "active": true
                },
                {
                    "uri": "https://api.calendly.com/event_types/old",
                    "name": "Old",
                    "duration": 60,
                    "scheduling_url": "https://calendly.com/artist/old",
                    "active": false
                },
                {
                    "uri": "https://api.calendly.com/event_types/consultation",
                    "name": "Consultation",
                    "duration": 30,
                    "scheduling_url": "https://calendly.com/artist/consultation"
                }
            ],
            "pagination": { "count": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let types = source_for(&server).fetch_event_types().await.unwrap();

    let names: Vec<_> = types.iter().map(|t| t.display_name.as_str()).collect();
    assert_eq!(names, vec!["Call", "Consultation"]);
    assert_eq!(types[1].duration_minutes, 30);
    assert_eq!(
        types[1].scheduling_url,
        "https://calendly.com/artist/consultation"
    );
}

#[tokio::test]
async fn proxy_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calendly"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Calendly access token not configured" })),
        )
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_event_types().await.unwrap_err();

    match err {
        SchedulerError::EventTypeProvider(reason) => {
            assert_eq!(reason, "Calendly access token not configured")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_field_in_a_success_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calendly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "rate limited" })))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_event_types().await.unwrap_err();

    assert!(matches!(err, SchedulerError::EventTypeProvider(ref r) if r == "rate limited"));
}

#[tokio::test]
async fn unreachable_proxy_is_a_request_error() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/api/calendly", server.uri());
    drop(server);

    let err = ProxyEventTypeSource::with_http(reqwest::Client::new(), endpoint)
        .fetch_event_types()
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulerError::EventTypeRequest(_)));
}
