// --- File: crates/encore_calendly/src/doc.rs ---
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::models::{CalendlyQuery, CalendlyRequestBody, ProxyErrorBody};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::calendly_get_handler,
        crate::handlers::calendly_post_handler
    ),
    components(schemas(CalendlyQuery, CalendlyRequestBody, ProxyErrorBody)),
    tags(
        (name = "Calendly", description = "Calendly v2 API proxy (user, event types, events, availability)")
    )
)]
pub struct CalendlyApiDoc;
