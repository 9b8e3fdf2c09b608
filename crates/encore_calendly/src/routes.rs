// --- File: crates/encore_calendly/src/routes.rs ---
use crate::handlers::{calendly_get_handler, calendly_post_handler, CalendlyState};
use axum::{routing::get, Router};
use encore_config::AppConfig;
use http::{header, HeaderName};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// The browser calls the proxy cross-origin, so the route answers preflight
/// requests for any origin.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Creates a router containing all routes for the Calendly feature.
pub fn routes(config: Arc<AppConfig>) -> Router {
    let state = Arc::new(CalendlyState { config });

    Router::new()
        .route(
            "/calendly",
            get(calendly_get_handler).post(calendly_post_handler),
        )
        .layer(cors_layer())
        .with_state(state)
}
