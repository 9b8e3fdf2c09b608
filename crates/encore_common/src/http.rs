// --- File: crates/encore_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{EncoreError, HttpStatusCode};

pub mod client;

/// Renders the error as `{"error": {"message", "code"}}` with the matching status.
impl IntoResponse for EncoreError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::validation_error;

    #[tokio::test]
    async fn error_response_carries_status_and_message() {
        let response = validation_error("name is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], 400);
        assert_eq!(
            body["error"]["message"],
            "Validation error: name is required"
        );
    }
}
