//! Database errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("No database section configured")]
    MissingConfig,

    #[error("Invalid database URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Could not prepare SQLite file {}: {source}", path.display())]
    StorageFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not connect to the database: {0}")]
    Connect(String),

    /// A statement failed; the message comes from the driver.
    #[error("Query failed: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
