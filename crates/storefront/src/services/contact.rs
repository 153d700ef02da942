//! Contact form submissions.

use thiserror::Error;

use armour_core::{Email, EmailError};

use crate::db::{ContactStore, RepositoryError};
use crate::models::{ContactMessage, NewContactMessage};

/// Maximum length of a contact message.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Errors that can occur submitting the contact form.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("name is required")]
    MissingName,

    #[error("message is required")]
    MissingMessage,

    #[error("message must be at most {MAX_MESSAGE_LENGTH} characters")]
    MessageTooLong,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

/// Validate and store a contact-form message.
///
/// # Errors
///
/// Returns a validation variant of [`ContactError`] for bad input, or
/// `ContactError::Storage` if the message could not be saved.
pub async fn submit_contact<S: ContactStore + ?Sized>(
    store: &S,
    name: &str,
    email: &str,
    message: &str,
) -> Result<ContactMessage, ContactError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContactError::MissingName);
    }
    let email = Email::parse(email)?;
    let message = message.trim();
    if message.is_empty() {
        return Err(ContactError::MissingMessage);
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(ContactError::MessageTooLong);
    }

    let saved = store
        .create_message(&NewContactMessage {
            name: name.to_owned(),
            email,
            message: message.to_owned(),
        })
        .await?;

    tracing::info!(message_id = %saved.id, "Contact message saved");
    Ok(saved)
}
