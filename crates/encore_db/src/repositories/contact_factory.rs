//! Factory for contact repositories

use crate::repositories::contact_sql::SqlContactRepository;
use crate::repositories::RepositoryFactory;
use crate::DbClient;

/// Builds [`SqlContactRepository`] instances over a [`DbClient`].
#[derive(Debug, Clone, Default)]
pub struct ContactRepositoryFactory;

impl ContactRepositoryFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlContactRepository, DbClient> for ContactRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlContactRepository {
        SqlContactRepository::new(db_client)
    }
}
