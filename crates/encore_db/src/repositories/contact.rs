//! Repository for contact form submissions

use crate::error::DbError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Processing status of a contact submission.
///
/// Every submission is stamped [`ContactStatus::New`] when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Answered,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Answered => "answered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(ContactStatus::New),
            "read" => Some(ContactStatus::Read),
            "answered" => Some(ContactStatus::Answered),
            _ => None,
        }
    }
}

impl fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated submission that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
}

/// A stored contact submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Storage for contact submissions.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Create the `contacts` table if it does not exist yet.
    async fn init_schema(&self) -> Result<(), DbError>;

    /// Persist a submission with status `new` and return the stored record.
    async fn create(&self, submission: NewContactSubmission) -> Result<ContactSubmission, DbError>;

    /// All submissions, oldest first.
    async fn find_all(&self) -> Result<Vec<ContactSubmission>, DbError>;
}
