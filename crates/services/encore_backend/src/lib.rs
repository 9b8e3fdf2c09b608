// --- File: crates/services/encore_backend/src/lib.rs ---
//! Router assembly for the Encore backend binary.
//!
//! Feature routers are merged under `/api` when their cargo feature is
//! compiled in and their runtime flag is on (see `encore_common::features`).

pub mod app;

pub use app::{api_router, build_app, StartupError};
