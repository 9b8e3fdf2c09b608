//! Repository modules for database access

pub mod contact;
pub mod contact_factory;
pub mod contact_sql;

pub use contact::{ContactRepository, ContactStatus, ContactSubmission, NewContactSubmission};
pub use contact_factory::ContactRepositoryFactory;
pub use contact_sql::SqlContactRepository;

/// A factory for repository instances over some backing client.
pub trait RepositoryFactory<R, C> {
    fn create_repository(&self, client: C) -> R;
}
