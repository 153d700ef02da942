//! In-memory storage for local development and testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use armour_core::{ContactMessageId, Email, ReviewId, UserId};

use super::{ContactStore, RepositoryError, ReviewStore, Storage, UserStore};
use crate::models::{ContactMessage, NewContactMessage, NewReview, Review, User};

/// In-memory [`Storage`]. Ids are assigned from per-table counters starting at 1.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: Arc<RwLock<HashMap<Email, (User, String)>>>,
    reviews: Arc<RwLock<Vec<Review>>>,
    messages: Arc<RwLock<Vec<ContactMessage>>>,
    user_seq: AtomicI32,
    review_seq: AtomicI32,
    message_seq: AtomicI32,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Contact messages received so far, oldest first.
    pub async fn messages(&self) -> Vec<ContactMessage> {
        self.messages.read().await.clone()
    }
}

fn next_id(seq: &AtomicI32) -> i32 {
    seq.fetch_add(1, Ordering::Relaxed) + 1
}

/// Newest first; the later id wins when timestamps collide.
fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
    reviews.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.as_i32().cmp(&a.id.as_i32()))
    });
    reviews
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn create_user(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }

        let user = User {
            id: UserId::new(next_id(&self.user_seq)),
            name: name.to_owned(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        users.insert(email.clone(), (user.clone(), password_hash.to_owned()));
        Ok(user)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let users = self.users.read().await;
        Ok(users.get(email).cloned())
    }
}

#[async_trait]
impl ReviewStore for MemoryStorage {
    async fn create_review(&self, review: &NewReview) -> Result<Review, RepositoryError> {
        let stored = Review {
            id: ReviewId::new(next_id(&self.review_seq)),
            product_id: review.product_id.clone(),
            name: review.name.clone(),
            email: review.email.clone(),
            rating: review.rating,
            message: review.message.clone(),
            created_at: Utc::now(),
        };
        self.reviews.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, RepositoryError> {
        let reviews = self.reviews.read().await;
        Ok(newest_first(reviews.clone()))
    }

    async fn list_reviews_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<Review>, RepositoryError> {
        let reviews = self.reviews.read().await;
        let matching = reviews
            .iter()
            .filter(|r| r.product_id.as_deref() == Some(product_id))
            .cloned()
            .collect();
        Ok(newest_first(matching))
    }

    async fn delete_review(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let mut reviews = self.reviews.write().await;
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        Ok(reviews.len() != before)
    }
}

#[async_trait]
impl ContactStore for MemoryStorage {
    async fn create_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        let stored = ContactMessage {
            id: ContactMessageId::new(next_id(&self.message_seq)),
            name: message.name.clone(),
            email: message.email.clone(),
            message: message.message.clone(),
            created_at: Utc::now(),
        };
        self.messages.write().await.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
