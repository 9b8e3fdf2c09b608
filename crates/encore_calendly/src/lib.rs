// --- File: crates/encore_calendly/src/lib.rs ---
//! Calendly proxy.
//!
//! Keeps the Calendly access token on the server and exposes four read-only
//! actions to the site: `user`, `event-types`, `events` and `availability`.
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

pub use logic::{CalendlyClient, CalendlyError};
pub use models::{CalendlyAction, ProxyErrorBody, ProxyRequest};
pub use routes::routes;
