//! Domain models for storefront.
//!
//! These are validated domain objects, separate from database row types.

pub mod contact;
pub mod review;
pub mod session;
pub mod user;

pub use contact::{ContactMessage, NewContactMessage};
pub use review::{NewReview, Review};
pub use session::{CurrentUser, session_keys};
pub use user::User;
