//! Database access for the Encore backend.
//!
//! A small sqlx `Any` pool wrapper plus the repository used by the contact
//! form. The contact schema is written for SQLite, which is the only
//! supported backend.
//!
//! ```rust,no_run
//! use encore_db::{ContactRepository, ContactRepositoryFactory, DbClient, RepositoryFactory};
//!
//! async fn setup() -> Result<(), encore_db::DbError> {
//!     let client = DbClient::from_url("sqlite://data/contacts.db").await?;
//!     let repository = ContactRepositoryFactory::new().create_repository(client);
//!     repository.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::{
    ContactRepository, ContactRepositoryFactory, ContactStatus, ContactSubmission,
    NewContactSubmission, RepositoryFactory, SqlContactRepository,
};
