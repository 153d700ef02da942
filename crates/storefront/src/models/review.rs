//! Product review types.

use chrono::{DateTime, Utc};

use armour_core::{Email, Rating, ReviewId};

/// A stored review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    /// Catalog product the review is about, if it was left on a product page.
    pub product_id: Option<String>,
    pub name: String,
    pub email: Email,
    pub rating: Rating,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A validated review that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: Option<String>,
    pub name: String,
    pub email: Email,
    pub rating: Rating,
    pub message: String,
}
