//! User domain types.

use chrono::{DateTime, Utc};

use armour_core::{Email, UserId};

/// A registered storefront customer (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name given at registration.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
