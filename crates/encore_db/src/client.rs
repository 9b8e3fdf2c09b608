//! Database client
//!
//! A thin wrapper around a sqlx `Any` pool so repositories stay agnostic of
//! the concrete database.

use crate::error::DbError;
use encore_config::{AppConfig, DatabaseConfig};
use sqlx::any::AnyConnectOptions;
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Database client backed by a connection pool.
#[derive(Debug, Clone)]
pub struct DbClient {
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Connect using the `database` section of the application config.
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        let section = config.database.as_ref().ok_or(DbError::MissingConfig)?;
        Self::from_config(section).await
    }

    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        Self::from_url(&db_config.url).await
    }

    /// Connect to a URL such as `sqlite://data/contacts.db`.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        let invalid = |reason: &str| DbError::InvalidUrl {
            url: db_url.to_string(),
            reason: reason.to_string(),
        };
        if db_url.trim().is_empty() {
            return Err(invalid("empty"));
        }
        if !db_url.starts_with("sqlite:") {
            return Err(invalid("only sqlite URLs are supported"));
        }

        sqlx::any::install_default_drivers();
        if let Some(path) = sqlite_file(db_url) {
            prepare_sqlite_file(path)?;
        }
        let options = AnyConnectOptions::from_str(db_url).map_err(|e| invalid(&e.to_string()))?;

        let pool = PoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Contact database unreachable: {}", e);
                DbError::Connect(e.to_string())
            })?;

        info!("Connected to contact database");
        Ok(Self { pool })
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows and report the affected row count.
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }
}

/// The file behind a SQLite URL, or `None` for other drivers and in-memory
/// databases.
fn sqlite_file(db_url: &str) -> Option<&Path> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next().unwrap_or(rest);
    if file.is_empty() || file.contains(":memory:") {
        return None;
    }
    Some(Path::new(file))
}

// The Any driver has no create_if_missing, so the file must exist first.
fn prepare_sqlite_file(path: &Path) -> Result<(), DbError> {
    let storage_error = |source| DbError::StorageFile {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(storage_error)?;
    }
    if !path.exists() {
        debug!("Creating SQLite file {}", path.display());
        std::fs::File::create(path).map_err(storage_error)?;
    }
    Ok(())
}
