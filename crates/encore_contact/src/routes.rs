// --- File: crates/encore_contact/src/routes.rs ---
use crate::handlers::{submit_contact_handler, ContactState};
use axum::{routing::post, Router};
use encore_config::AppConfig;
use encore_db::ContactRepository;
use std::sync::Arc;

/// Creates a router containing all routes for the contact feature.
pub fn routes(config: Arc<AppConfig>, repository: Arc<dyn ContactRepository>) -> Router {
    let state = Arc::new(ContactState { config, repository });

    Router::new()
        .route("/contact", post(submit_contact_handler))
        .with_state(state)
}
