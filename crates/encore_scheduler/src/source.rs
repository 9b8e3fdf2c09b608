// --- File: crates/encore_scheduler/src/source.rs ---
use crate::error::SchedulerError;
use crate::models::MeetingType;
use async_trait::async_trait;
use encore_common::HTTP_CLIENT;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Where the loader gets its meeting types from.
#[async_trait]
pub trait EventTypeSource: Send + Sync {
    async fn fetch_event_types(&self) -> Result<Vec<MeetingType>, SchedulerError>;
}

/// A fixed list, for offline pages and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEventTypeSource {
    types: Vec<MeetingType>,
}

impl StaticEventTypeSource {
    pub fn new(types: Vec<MeetingType>) -> Self {
        Self { types }
    }
}

#[async_trait]
impl EventTypeSource for StaticEventTypeSource {
    async fn fetch_event_types(&self) -> Result<Vec<MeetingType>, SchedulerError> {
        Ok(self.types.clone())
    }
}

/// One entry of Calendly's `event_types` collection.
#[derive(Debug, Deserialize)]
struct CalendlyEventType {
    uri: String,
    name: String,
    duration: i64,
    scheduling_url: String,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

/// Convert a proxy response body into meeting types.
///
/// Inactive, malformed or non-positive-duration entries are skipped with a
/// warning; the rest keep their order.
pub fn parse_event_types(body: &Value) -> Result<Vec<MeetingType>, SchedulerError> {
    if let Some(error) = body.get("error") {
        let message = error
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(SchedulerError::EventTypeProvider(message));
    }

    let collection = body
        .get("collection")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SchedulerError::EventTypeProvider("response has no collection".to_string())
        })?;

    let mut types = Vec::with_capacity(collection.len());
    for item in collection {
        let event_type: CalendlyEventType = match serde_json::from_value(item.clone()) {
            Ok(event_type) => event_type,
            Err(e) => {
                warn!("Skipping malformed event type: {}", e);
                continue;
            }
        };
        if !event_type.active {
            debug!("Skipping inactive event type {}", event_type.uri);
            continue;
        }
        let Ok(duration_minutes) = u32::try_from(event_type.duration) else {
            warn!(
                "Skipping event type {} with duration {}",
                event_type.uri, event_type.duration
            );
            continue;
        };
        types.push(MeetingType {
            identifier: event_type.uri,
            display_name: event_type.name,
            duration_minutes,
            scheduling_url: event_type.scheduling_url,
        });
    }
    Ok(types)
}

/// Asks the backend's Calendly proxy for the event types.
#[derive(Debug, Clone)]
pub struct ProxyEventTypeSource {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyEventTypeSource {
    /// `endpoint` is the proxy URL, e.g. `https://artist.example/api/calendly`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http(HTTP_CLIENT.clone(), endpoint)
    }

    pub fn with_http(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EventTypeSource for ProxyEventTypeSource {
    async fn fetch_event_types(&self) -> Result<Vec<MeetingType>, SchedulerError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "action": "event-types" }))
            .send()
            .await
            .map_err(|e| SchedulerError::EventTypeRequest(e.to_string()))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {}", status.as_u16()));
            return Err(SchedulerError::EventTypeProvider(reason));
        }

        parse_event_types(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calendly_collection() {
        let body = json!({
            "collection": [
                {
                    "uri": "https://api.calendly.com/event_types/A",
                    "name": "Consultation",
                    "duration": 30,
                    "scheduling_url": "https://calendly.com/artist/consultation",
                    "active": true
                },
                {
                    "uri": "https://api.calendly.com/event_types/B",
                    "name": "Old format",
                    "duration": 45,
                    "scheduling_url": "https://calendly.com/artist/old",
                    "active": false
                },
                {
                    "uri": "https://api.calendly.com/event_types/C",
                    "name": "Call",
                    "duration": 15,
                    "scheduling_url": "https://calendly.com/artist/call"
                }
            ],
            "pagination": { "count": 3 }
        });

        let types = parse_event_types(&body).unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].display_name, "Consultation");
        assert_eq!(types[1].identifier, "https://api.calendly.com/event_types/C");
        assert_eq!(types[1].duration_minutes, 15);
    }

    #[test]
    fn skips_negative_durations_and_malformed_items() {
        let body = json!({
            "collection": [
                { "uri": "x", "name": "Broken", "duration": -5, "scheduling_url": "https://x" },
                { "name": "No uri" }
            ]
        });
        assert!(parse_event_types(&body).unwrap().is_empty());
    }

    #[test]
    fn error_field_is_an_error() {
        let body = json!({ "error": "Calendly API error", "status": 401 });
        assert_eq!(
            parse_event_types(&body),
            Err(SchedulerError::EventTypeProvider("Calendly API error".into()))
        );
    }

    #[tokio::test]
    async fn static_source_returns_its_list() {
        let source = StaticEventTypeSource::new(vec![MeetingType::new(
            "a",
            "Consultation",
            30,
            "https://x/consultation",
        )]);
        assert_eq!(source.fetch_event_types().await.unwrap().len(), 1);
    }
}
