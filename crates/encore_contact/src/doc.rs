// --- File: crates/encore_contact/src/doc.rs ---
#![cfg(feature = "openapi")]

use utoipa::OpenApi;

use crate::models::{ContactErrorResponse, ContactRequest, ContactResponse};

#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::submit_contact_handler),
    components(schemas(ContactRequest, ContactResponse, ContactErrorResponse)),
    tags(
        (name = "Contact", description = "Contact form submissions")
    )
)]
pub struct ContactApiDoc;
