//! SQL implementation of the contact repository

use crate::error::DbError;
use crate::repositories::contact::{
    ContactRepository, ContactStatus, ContactSubmission, NewContactSubmission,
};
use crate::DbClient;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of [`ContactRepository`].
///
/// Optional fields are stored as empty strings because the `Any` driver does
/// not bind `NULL` reliably across backends.
#[derive(Debug, Clone)]
pub struct SqlContactRepository {
    db_client: DbClient,
}

impl SqlContactRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    fn row_to_submission(row: &AnyRow) -> ContactSubmission {
        let optional = |column: &str| -> Option<String> {
            row.try_get::<String, _>(column)
                .ok()
                .filter(|value| !value.is_empty())
        };
        let status: String = row.try_get("status").unwrap_or_default();

        ContactSubmission {
            id: row.try_get("id").unwrap_or_default(),
            name: row.try_get("name").unwrap_or_default(),
            email: row.try_get("email").unwrap_or_default(),
            phone: optional("phone"),
            subject: optional("subject"),
            message: row.try_get("message").unwrap_or_default(),
            status: ContactStatus::parse(&status).unwrap_or_default(),
            created_at: row.try_get("created_at").unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ContactRepository for SqlContactRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing contacts schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL DEFAULT '',
                subject TEXT NOT NULL DEFAULT '',
                message TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Contacts schema initialized successfully");
        Ok(())
    }

    async fn create(&self, submission: NewContactSubmission) -> Result<ContactSubmission, DbError> {
        debug!("Storing contact submission from: {}", submission.email);

        let status = ContactStatus::New;
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let query = r#"
            INSERT INTO contacts (name, email, phone, subject, message, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
        "#;

        let row = sqlx::query(query)
            .bind(&submission.name)
            .bind(&submission.email)
            .bind(submission.phone.clone().unwrap_or_default())
            .bind(submission.subject.clone().unwrap_or_default())
            .bind(&submission.message)
            .bind(status.as_str())
            .bind(&created_at)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert contact submission: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        info!("Contact submission {} stored", id);
        Ok(ContactSubmission {
            id,
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            subject: submission.subject,
            message: submission.message,
            status,
            created_at,
        })
    }

    async fn find_all(&self) -> Result<Vec<ContactSubmission>, DbError> {
        let query = r#"
            SELECT id, name, email, phone, subject, message, status, created_at
            FROM contacts
            ORDER BY id
        "#;

        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list contact submissions: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(rows.iter().map(Self::row_to_submission).collect())
    }
}
