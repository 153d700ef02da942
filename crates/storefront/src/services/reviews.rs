//! Review submission, listing and deletion.
//!
//! A review is stored first and acknowledged second. The acknowledgement is
//! best-effort: a failed or slow email is logged and never undoes the write,
//! and nothing is sent when the write fails.

use std::time::Duration;

use thiserror::Error;

use armour_core::{Email, EmailError, Rating, RatingError, ReviewId};

use crate::db::{RepositoryError, ReviewStore};
use crate::models::{NewReview, Review};
use crate::services::email::{Notifier, NotifyError};

/// Maximum length of a review body.
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// Errors that can occur handling reviews.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("name is required")]
    MissingName,

    #[error("review message is required")]
    MissingMessage,

    #[error("review message must be at most {MAX_MESSAGE_LENGTH} characters")]
    MessageTooLong,

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("storage failure: {0}")]
    Storage(#[from] RepositoryError),
}

impl ReviewError {
    /// Whether the submitter can fix this by correcting the form.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

/// Raw review form fields.
#[derive(Debug, Clone, Default)]
pub struct ReviewInput<'a> {
    pub product_id: Option<&'a str>,
    pub name: &'a str,
    pub email: &'a str,
    pub rating: i64,
    pub message: &'a str,
}

impl ReviewInput<'_> {
    /// Validate into a [`NewReview`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ReviewError`] validation failure.
    pub fn validate(&self) -> Result<NewReview, ReviewError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ReviewError::MissingName);
        }
        let email = Email::parse(self.email)?;
        let rating = Rating::try_from(self.rating)?;
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ReviewError::MissingMessage);
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ReviewError::MessageTooLong);
        }

        Ok(NewReview {
            product_id: self
                .product_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned),
            name: name.to_owned(),
            email,
            rating,
            message: message.to_owned(),
        })
    }
}

/// Result of a successful submission.
#[derive(Debug)]
pub struct Submitted {
    pub review: Review,
    /// Whether the confirmation email went out.
    pub notified: bool,
}

/// Review service.
pub struct ReviewService<'a, S: ReviewStore + ?Sized, N: Notifier + ?Sized> {
    store: &'a S,
    notifier: &'a N,
    notify_timeout: Duration,
}

impl<'a, S: ReviewStore + ?Sized, N: Notifier + ?Sized> ReviewService<'a, S, N> {
    #[must_use]
    pub const fn new(store: &'a S, notifier: &'a N, notify_timeout: Duration) -> Self {
        Self {
            store,
            notifier,
            notify_timeout,
        }
    }

    /// Store a review, then send the confirmation email.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Storage` if the review could not be saved; no
    /// email is sent in that case.
    pub async fn submit(&self, review: NewReview) -> Result<Submitted, ReviewError> {
        let review = self.store.create_review(&review).await?;
        tracing::info!(review_id = %review.id, product_id = ?review.product_id, "Review saved");

        let notified = match self.notify(&review).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    review_id = %review.id,
                    error = %e,
                    "Review confirmation email failed"
                );
                false
            }
        };

        Ok(Submitted { review, notified })
    }

    async fn notify(&self, review: &Review) -> Result<(), NotifyError> {
        tokio::time::timeout(
            self.notify_timeout,
            self.notifier.send_review_confirmation(review),
        )
        .await
        .map_err(|_| NotifyError::Timeout(self.notify_timeout))?
    }

    /// All reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Storage` if the store cannot be read.
    pub async fn list(&self) -> Result<Vec<Review>, ReviewError> {
        Ok(self.store.list_reviews().await?)
    }

    /// Reviews for one product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Storage` if the store cannot be read.
    pub async fn list_for_product(&self, product_id: &str) -> Result<Vec<Review>, ReviewError> {
        Ok(self.store.list_reviews_for_product(product_id).await?)
    }

    /// Delete a review by id. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `ReviewError::Storage` if the store rejects the delete.
    pub async fn delete(&self, id: ReviewId) -> Result<bool, ReviewError> {
        Ok(self.store.delete_review(id).await?)
    }
}
