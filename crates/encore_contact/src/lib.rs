// --- File: crates/encore_contact/src/lib.rs ---
pub mod doc;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

pub use logic::{is_valid_email, validate, ContactError};
pub use models::{ContactRequest, ContactResponse};
pub use routes::routes;
