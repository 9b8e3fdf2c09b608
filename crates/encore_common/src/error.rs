// --- File: crates/encore_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by the Encore crates.
///
/// Each crate keeps its own error enum and converts into this one at the
/// HTTP boundary via `From`.
#[derive(Error, Debug)]
pub enum EncoreError {
    /// Transport failure talking to an upstream API.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// An upstream body or a request body that did not decode.
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Missing section, flag or secret.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Contact store error: {0}")]
    DatabaseError(String),

    /// Calendly or the completion API answered with an error.
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Unknown route or meeting type.
    #[error("Not found: {0}")]
    NotFoundError(String),
}

/// Status code an error is reported with.
pub trait HttpStatusCode {
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for EncoreError {
    fn status_code(&self) -> u16 {
        match self {
            EncoreError::ParseError(_) | EncoreError::ValidationError(_) => 400,
            EncoreError::NotFoundError(_) => 404,
            EncoreError::ExternalServiceError { .. } => 502,
            EncoreError::HttpError(_)
            | EncoreError::ConfigError(_)
            | EncoreError::DatabaseError(_) => 500,
        }
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> EncoreError {
    EncoreError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> EncoreError {
    EncoreError::ValidationError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> EncoreError {
    EncoreError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}
