//! Persistence for storefront data.
//!
//! # Database: `storefront` schema
//!
//! ## Tables
//!
//! - `storefront.user` - Registered customers (argon2 password hashes)
//! - `storefront.review` - Product reviews
//! - `storefront.contact_message` - Contact form submissions
//! - `tower_sessions.session` - Session records (cart, current user)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p armour-cli -- migrate
//! ```
//!
//! # Backends
//!
//! Handlers talk to the [`Storage`] trait. [`PgStore`] is the production
//! implementation; [`MemoryStorage`] keeps everything in process memory for
//! local development and tests.

pub mod memory;
pub mod messages;
pub mod reviews;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use armour_core::{Email, ReviewId};

use crate::models::{ContactMessage, NewContactMessage, NewReview, Review, User};

pub use memory::MemoryStorage;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the email is taken.
    async fn create_user(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError>;

    /// Look up a user together with their stored password hash.
    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError>;
}

/// Review store. Listings are newest first, ties broken by id descending.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create_review(&self, review: &NewReview) -> Result<Review, RepositoryError>;

    async fn list_reviews(&self) -> Result<Vec<Review>, RepositoryError>;

    async fn list_reviews_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<Review>, RepositoryError>;

    /// Delete a review. Returns `false` when no review had that id.
    async fn delete_review(&self, id: ReviewId) -> Result<bool, RepositoryError>;
}

/// Contact message store.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn create_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError>;
}

/// Everything the storefront persists, behind one handle.
#[async_trait]
pub trait Storage: UserStore + ReviewStore + ContactStore {
    /// Cheap connectivity check for the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// `PostgreSQL`-backed storage.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// The pool connects lazily, so an unreachable database does not prevent
/// the storefront from starting; the readiness probe reports it instead.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection string cannot be parsed.
pub fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect_lazy(database_url.expose_secret())
}

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

/// Re-validate an email read back from the database.
fn parse_stored_email(raw: &str) -> Result<Email, RepositoryError> {
    Email::parse(raw)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in database: {e}")))
}
