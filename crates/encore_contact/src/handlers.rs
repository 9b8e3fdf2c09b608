// --- File: crates/encore_contact/src/handlers.rs ---
use crate::logic::{validate, ContactError, SENT_MESSAGE};
use crate::models::{ContactErrorResponse, ContactRequest, ContactResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use encore_common::log_error;
use encore_config::AppConfig;
use encore_db::ContactRepository;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ContactState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn ContactRepository>,
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = match &self {
            ContactError::Disabled => StatusCode::SERVICE_UNAVAILABLE,
            ContactError::MissingFields | ContactError::InvalidEmail => StatusCode::BAD_REQUEST,
            ContactError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ContactErrorResponse {
            error: self.user_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Store a contact form submission.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/contact",
    request_body(content = ContactRequest, example = json!({
        "name": "Awa Koné",
        "email": "awa@example.com",
        "subject": "Wedding",
        "phone": "+225 07 00 00 00",
        "message": "Are you available on 14 June?"
    })),
    responses(
        (status = 201, description = "Submission stored", body = ContactResponse),
        (status = 400, description = "Missing fields or invalid email", body = ContactErrorResponse),
        (status = 500, description = "Storage failure", body = ContactErrorResponse)
    ),
    tag = "Contact"
))]
pub async fn submit_contact_handler(
    State(state): State<Arc<ContactState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ContactError> {
    if !state.config.use_contact {
        return Err(ContactError::Disabled);
    }

    let submission = validate(payload).inspect_err(|e| {
        warn!("Rejected contact submission: {}", e);
    })?;

    let stored = state.repository.create(submission).await.map_err(|e| {
        log_error(&e, "Error submitting contact form");
        ContactError::from(e)
    })?;

    info!("Contact submission {} received", stored.id);
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            id: stored.id,
            status: stored.status.to_string(),
            message: SENT_MESSAGE.to_string(),
        }),
    ))
}
