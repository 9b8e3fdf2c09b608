// --- File: crates/encore_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for outbound HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A shared HTTP client for calls to third-party APIs.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT_SECS).unwrap_or_else(|err| {
        tracing::warn!("Falling back to default HTTP client: {}", err);
        Client::new()
    })
});

/// Creates a new HTTP client with the given timeout.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
