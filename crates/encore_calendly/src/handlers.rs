// --- File: crates/encore_calendly/src/handlers.rs ---
use crate::logic::{run_action, CalendlyClient, CalendlyError};
use crate::models::{CalendlyQuery, CalendlyRequestBody, ProxyRequest};
use axum::{
    body::Bytes,
    extract::{Query, State},
    response::{IntoResponse, Json, Response},
};
use encore_common::{log_error, log_result};
use encore_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct CalendlyState {
    pub config: Arc<AppConfig>,
}

impl IntoResponse for CalendlyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

fn client_for(state: &CalendlyState) -> Result<CalendlyClient, CalendlyError> {
    if !state.config.use_calendly {
        return Err(CalendlyError::Disabled);
    }
    let calendly_config = state.config.calendly.as_ref().ok_or_else(|| {
        error!("CALENDLY_ACCESS_TOKEN not found: calendly section missing");
        CalendlyError::MissingToken
    })?;
    CalendlyClient::from_config(calendly_config)
        .inspect_err(|e| log_error(e, "CALENDLY_ACCESS_TOKEN not found"))
}

async fn proxy(
    client: &CalendlyClient,
    request: ProxyRequest,
) -> Result<Json<Value>, CalendlyError> {
    info!("Calendly API request - Action: {}", request.action);
    let data = log_result(
        run_action(client, &request).await,
        &format!("Calendly API success - Action: {}", request.action),
        &format!("Calendly proxy failed for action {}", request.action),
    )?;
    Ok(Json(data))
}

/// Proxy a Calendly action selected by query string.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calendly",
    params(CalendlyQuery),
    responses(
        (status = 200, description = "Upstream Calendly JSON, passed through unchanged"),
        (status = 400, description = "Invalid action or missing parameter", body = crate::models::ProxyErrorBody),
        (status = 500, description = "Configuration or internal error", body = crate::models::ProxyErrorBody)
    ),
    tag = "Calendly"
))]
pub async fn calendly_get_handler(
    State(state): State<Arc<CalendlyState>>,
    Query(query): Query<CalendlyQuery>,
) -> Result<Json<Value>, CalendlyError> {
    let client = client_for(&state)?;
    proxy(&client, ProxyRequest::resolve(query, None)).await
}

/// Proxy a Calendly action. Without a query `action` the body must be a
/// JSON object; an empty or malformed body is an internal error.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/calendly",
    params(CalendlyQuery),
    request_body(content = CalendlyRequestBody, example = json!({"action": "event-types"})),
    responses(
        (status = 200, description = "Upstream Calendly JSON, passed through unchanged"),
        (status = 400, description = "Invalid action or missing parameter", body = crate::models::ProxyErrorBody),
        (status = 500, description = "Configuration or internal error", body = crate::models::ProxyErrorBody)
    ),
    tag = "Calendly"
))]
pub async fn calendly_post_handler(
    State(state): State<Arc<CalendlyState>>,
    Query(query): Query<CalendlyQuery>,
    body: Bytes,
) -> Result<Json<Value>, CalendlyError> {
    let client = client_for(&state)?;
    let has_query_action = query.action.as_deref().is_some_and(|a| !a.is_empty());
    let body = if has_query_action {
        None
    } else {
        let parsed: CalendlyRequestBody = serde_json::from_slice(&body)
            .map_err(|e| CalendlyError::Request(format!("invalid request body: {}", e)))?;
        Some(parsed)
    };
    proxy(&client, ProxyRequest::resolve(query, body)).await
}
