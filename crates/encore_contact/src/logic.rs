// --- File: crates/encore_contact/src/logic.rs ---
use crate::models::ContactRequest;
use encore_common::{config_error, validation_error, EncoreError};
use encore_db::{DbError, NewContactSubmission};
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "Veuillez remplir tous les champs obligatoires.";
pub const INVALID_EMAIL_MESSAGE: &str = "Veuillez entrer une adresse email valide.";
pub const STORAGE_FAILED_MESSAGE: &str = "Une erreur est survenue. Veuillez réessayer.";
pub const SENT_MESSAGE: &str = "Message envoyé !";

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Contact service is disabled")]
    Disabled,
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,
    #[error("{}", INVALID_EMAIL_MESSAGE)]
    InvalidEmail,
    #[error("Failed to store contact submission: {0}")]
    Storage(#[from] DbError),
}

impl ContactError {
    /// The message shown to the visitor. Storage details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::Disabled => "Contact form is currently unavailable.",
            ContactError::MissingFields => MISSING_FIELDS_MESSAGE,
            ContactError::InvalidEmail => INVALID_EMAIL_MESSAGE,
            ContactError::Storage(_) => STORAGE_FAILED_MESSAGE,
        }
    }
}

impl From<ContactError> for EncoreError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Disabled => config_error(err),
            ContactError::MissingFields | ContactError::InvalidEmail => validation_error(err),
            ContactError::Storage(db) => EncoreError::DatabaseError(db.to_string()),
        }
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate a form submission and normalise it for storage.
///
/// Required fields are checked before the email format, so an empty form
/// always reports the missing fields first.
pub fn validate(request: ContactRequest) -> Result<NewContactSubmission, ContactError> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ContactError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(ContactError::InvalidEmail);
    }

    Ok(NewContactSubmission {
        name: name.to_string(),
        email: email.to_string(),
        phone: trimmed_optional(request.phone),
        subject: trimmed_optional(request.subject),
        message: message.to_string(),
    })
}
