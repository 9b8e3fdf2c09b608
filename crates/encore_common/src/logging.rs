//! Logging utilities for the Encore backend.
//!
//! Every crate logs through `tracing`; the binary calls [`init`] once at
//! startup to install the subscriber.

use std::fmt::Display;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO level.
///
/// ```
/// use encore_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `encore` crates.
///
/// `RUST_LOG` directives are honoured on top of that default. Calling this
/// more than once is harmless; later calls leave the first subscriber in place.
pub fn init_with_level(level: Level) {
    let filter = EnvFilter::from_default_env();
    let filter = match format!("encore={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error at ERROR level, prefixed with what was being attempted.
pub fn log_error<E: Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log the outcome of `result` and hand it back unchanged.
///
/// `Ok` logs `success_message` at INFO; `Err` logs the error at ERROR,
/// prefixed with `error_context`.
pub fn log_result<T, E: Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => log_error(e, error_context),
    }
    result
}
