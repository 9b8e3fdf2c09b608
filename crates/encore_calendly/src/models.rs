// --- File: crates/encore_calendly/src/models.rs ---
use serde::{Deserialize, Serialize};
use std::fmt;

/// The proxy operations exposed at `/calendly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendlyAction {
    /// The current Calendly user.
    User,
    /// The user's event types (the meeting-type catalog).
    EventTypes,
    /// The user's active scheduled events.
    Events,
    /// Available start times for one event type.
    Availability,
}

impl CalendlyAction {
    pub const DEFAULT: CalendlyAction = CalendlyAction::Events;

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(CalendlyAction::User),
            "event-types" => Some(CalendlyAction::EventTypes),
            "events" => Some(CalendlyAction::Events),
            "availability" => Some(CalendlyAction::Availability),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalendlyAction::User => "user",
            CalendlyAction::EventTypes => "event-types",
            CalendlyAction::Events => "events",
            CalendlyAction::Availability => "availability",
        }
    }
}

impl fmt::Display for CalendlyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query parameters accepted by the proxy.
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CalendlyQuery {
    /// `user`, `event-types`, `events` or `availability`.
    pub action: Option<String>,
    /// Required by `availability`.
    pub event_type_uri: Option<String>,
    /// RFC 3339; defaults to now.
    pub start_time: Option<String>,
    /// RFC 3339; defaults to now + 30 days.
    pub end_time: Option<String>,
}

/// Optional JSON body of a POST request. Only consulted when the query
/// string carries no action.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CalendlyRequestBody {
    pub action: Option<String>,
    pub event_type_uri: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// A fully resolved proxy request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRequest {
    pub action: String,
    pub event_type_uri: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl ProxyRequest {
    /// Merge query and body. The query action wins; without one the body's
    /// action is used, and `events` is the final default.
    pub fn resolve(query: CalendlyQuery, body: Option<CalendlyRequestBody>) -> Self {
        let body = body.unwrap_or_default();
        let action = query
            .action
            .filter(|a| !a.is_empty())
            .or(body.action.filter(|a| !a.is_empty()))
            .unwrap_or_else(|| CalendlyAction::DEFAULT.as_str().to_string());

        ProxyRequest {
            action,
            event_type_uri: query.event_type_uri.or(body.event_type_uri),
            start_time: query.start_time.or(body.start_time),
            end_time: query.end_time.or(body.end_time),
        }
    }
}

/// Error body returned by the proxy, matching what the site's front-end
/// already understands.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// The subset of `GET /users/me` the proxy needs.
#[derive(Debug, Deserialize)]
pub(crate) struct CurrentUser {
    pub resource: UserResource,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResource {
    pub uri: String,
}
