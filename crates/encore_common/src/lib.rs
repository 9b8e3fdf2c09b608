// --- File: crates/encore_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Runtime feature checks
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, validation_error, EncoreError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, HTTP_CLIENT};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use features::{is_calendly_enabled, is_chat_enabled, is_contact_enabled, is_feature_enabled};
