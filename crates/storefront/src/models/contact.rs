//! Contact form messages.

use chrono::{DateTime, Utc};

use armour_core::{ContactMessageId, Email};

/// A stored contact-form submission.
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub name: String,
    pub email: Email,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A validated contact-form submission.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub message: String,
}
