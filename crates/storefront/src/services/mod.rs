//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Registration and password login
//! - `cart` - Session cart operations
//! - `contact` - Contact form submissions
//! - `email` - Review confirmation notifications (SMTP or log-only)
//! - `reviews` - Review submission, listing and deletion

pub mod auth;
pub mod cart;
pub mod contact;
pub mod email;
pub mod reviews;
