// --- File: crates/encore_calendly/src/logic.rs ---
use crate::models::{CalendlyAction, CurrentUser, ProxyErrorBody, ProxyRequest};
use axum::http::StatusCode;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use encore_common::{
    config_error, external_service_error, validation_error, EncoreError, HTTP_CLIENT,
};
use encore_config::CalendlyConfig;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

/// Length of the default availability window.
pub const AVAILABILITY_WINDOW_DAYS: i64 = 30;

#[derive(Error, Debug)]
pub enum CalendlyError {
    #[error("Calendly service is disabled")]
    Disabled,
    #[error("Calendly access token is not configured")]
    MissingToken,
    #[error("{0} parameter required")]
    MissingParameter(&'static str),
    #[error("Invalid action parameter: {0}")]
    InvalidAction(String),
    #[error("Calendly API error {status}: {details}")]
    Api { status: u16, details: String },
    #[error("Calendly request failed: {0}")]
    Request(String),
    #[error("Failed to parse Calendly response: {0}")]
    Parse(String),
}

impl CalendlyError {
    /// HTTP status the proxy answers with. Upstream failures keep the
    /// upstream status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CalendlyError::Disabled => StatusCode::SERVICE_UNAVAILABLE,
            CalendlyError::MissingToken => StatusCode::INTERNAL_SERVER_ERROR,
            CalendlyError::MissingParameter(_) | CalendlyError::InvalidAction(_) => {
                StatusCode::BAD_REQUEST
            }
            CalendlyError::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            CalendlyError::Request(_) | CalendlyError::Parse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The `{"error", "details", "status"}` body for this failure.
    pub fn to_body(&self) -> ProxyErrorBody {
        match self {
            CalendlyError::Disabled => ProxyErrorBody {
                error: "Calendly service is disabled".to_string(),
                details: None,
                status: None,
            },
            CalendlyError::MissingToken => ProxyErrorBody {
                error: "Configuration error".to_string(),
                details: None,
                status: None,
            },
            CalendlyError::MissingParameter(name) => ProxyErrorBody {
                error: format!("{} parameter required", name),
                details: None,
                status: None,
            },
            CalendlyError::InvalidAction(_) => ProxyErrorBody {
                error: "Invalid action parameter".to_string(),
                details: None,
                status: None,
            },
            CalendlyError::Api { status, details } => ProxyErrorBody {
                error: "Calendly API error".to_string(),
                details: Some(details.clone()),
                status: Some(*status),
            },
            CalendlyError::Request(msg) | CalendlyError::Parse(msg) => ProxyErrorBody {
                error: "Internal server error".to_string(),
                details: Some(msg.clone()),
                status: None,
            },
        }
    }
}

impl From<CalendlyError> for EncoreError {
    fn from(err: CalendlyError) -> Self {
        match err {
            CalendlyError::Disabled | CalendlyError::MissingToken => config_error(err),
            CalendlyError::MissingParameter(_) | CalendlyError::InvalidAction(_) => {
                validation_error(err)
            }
            CalendlyError::Api { .. } => external_service_error("Calendly API", err),
            CalendlyError::Request(msg) => EncoreError::HttpError(msg),
            CalendlyError::Parse(msg) => EncoreError::ParseError(msg),
        }
    }
}

/// Minimal client for the Calendly v2 REST API.
#[derive(Debug, Clone)]
pub struct CalendlyClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl CalendlyClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Build a client on the shared HTTP client. An absent or empty token is
    /// a configuration error.
    pub fn from_config(config: &CalendlyConfig) -> Result<Self, CalendlyError> {
        let token = config
            .access_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(CalendlyError::MissingToken)?;

        Ok(Self::new(HTTP_CLIENT.clone(), &config.api_base_url, token))
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, CalendlyError> {
        let mut url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        if !query.is_empty() {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| CalendlyError::Request(e.to_string()))?;
            url.push('?');
            url.push_str(&encoded);
        }
        debug!("Calendly GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| CalendlyError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            error!("Calendly API error: {} {}", status, details);
            return Err(CalendlyError::Api {
                status: status.as_u16(),
                details,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| CalendlyError::Parse(e.to_string()))
    }

    pub async fn current_user(&self) -> Result<Value, CalendlyError> {
        self.get("/users/me", &[]).await
    }

    pub async fn current_user_uri(&self) -> Result<String, CalendlyError> {
        let user: CurrentUser = serde_json::from_value(self.current_user().await?)
            .map_err(|e| CalendlyError::Parse(e.to_string()))?;
        Ok(user.resource.uri)
    }

    pub async fn event_types(&self) -> Result<Value, CalendlyError> {
        let user_uri = self.current_user_uri().await?;
        self.get("/event_types", &[("user", &user_uri)]).await
    }

    pub async fn scheduled_events(&self) -> Result<Value, CalendlyError> {
        let user_uri = self.current_user_uri().await?;
        self.get(
            "/scheduled_events",
            &[("user", &user_uri), ("status", "active")],
        )
        .await
    }

    pub async fn available_times(
        &self,
        event_type_uri: &str,
        start_time: &str,
        end_time: &str,
    ) -> Result<Value, CalendlyError> {
        self.get(
            "/event_type_available_times",
            &[
                ("event_type", event_type_uri),
                ("start_time", start_time),
                ("end_time", end_time),
            ],
        )
        .await
    }
}

/// Fill in a missing availability window: start defaults to `now`, end to
/// `now` plus thirty days.
pub fn availability_window(
    now: DateTime<Utc>,
    start_time: Option<&str>,
    end_time: Option<&str>,
) -> (String, String) {
    let format = |t: DateTime<Utc>| t.to_rfc3339_opts(SecondsFormat::Millis, true);
    let start = start_time
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format(now));
    let end = end_time
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format(now + Duration::days(AVAILABILITY_WINDOW_DAYS)));
    (start, end)
}

/// Run one proxy action and return the upstream JSON body unchanged.
pub async fn run_action(
    client: &CalendlyClient,
    request: &ProxyRequest,
) -> Result<Value, CalendlyError> {
    let action = CalendlyAction::parse(&request.action)
        .ok_or_else(|| CalendlyError::InvalidAction(request.action.clone()))?;

    match action {
        CalendlyAction::User => client.current_user().await,
        CalendlyAction::EventTypes => client.event_types().await,
        CalendlyAction::Events => client.scheduled_events().await,
        CalendlyAction::Availability => {
            let event_type_uri = request
                .event_type_uri
                .as_deref()
                .filter(|uri| !uri.is_empty())
                .ok_or(CalendlyError::MissingParameter("event_type_uri"))?;
            let (start, end) = availability_window(
                Utc::now(),
                request.start_time.as_deref(),
                request.end_time.as_deref(),
            );
            client.available_times(event_type_uri, &start, &end).await
        }
    }
}
