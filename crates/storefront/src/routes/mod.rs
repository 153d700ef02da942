//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (requires login)
//! GET  /about                  - About page
//! GET  /size-guide             - Size guide
//! GET  /contact                - Contact form
//! POST /contact                - Submit contact form
//!
//! # Catalog
//! GET  /products               - Featured products
//! GET  /tshirts, /shop/tshirt  - T-shirt collection
//! GET  /hoodies, /shop/hoodie  - Hoodie collection
//! GET  /tacticaps, /shop/tacticap - Cap collection
//! GET  /cargos, /shop/cargo    - Cargo collection
//! GET  /product/{id}           - Product detail with reviews
//!
//! # Cart
//! POST /add-to-cart            - Add catalog product (JSON)
//! POST /cart/add               - Add client-described product (JSON)
//! GET  /cart                   - Cart page
//! GET  /cart/remove/{id}       - Remove line
//!
//! # Reviews
//! GET  /reviews                - All reviews
//! POST /reviews                - Submit review
//! POST /reviews/delete/{id}    - Delete review
//!
//! # Auth
//! GET  /login, /register       - Forms (redirect home when logged in)
//! POST /login, /register       - Credential submission (rate limited)
//! GET  /logout                 - Destroy session
//! ```

pub mod auth;
pub mod cart;
pub mod collections;
pub mod contact;
pub mod page;
pub mod pages;
pub mod products;
pub mod reviews;

pub use page::PageContext;

use axum::{
    Router,
    routing::{get, post},
};

use crate::catalog::FEATURED;
use crate::middleware::auth_rate_limiter;
use crate::state::AppState;
use collections::collection_page;

/// Create the auth routes router.
///
/// Only the credential submissions pass through the rate limiter.
pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let mut credentials = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register));

    if let Some(limiter) = auth_rate_limiter(&state.config().auth_rate_limit) {
        credentials = credentials.layer(limiter);
    }

    Router::new()
        .route("/login", get(auth::login_page))
        .route("/register", get(auth::register_page))
        .route("/logout", get(auth::logout))
        .merge(credentials)
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", collection_page(FEATURED))
        .route("/tshirts", collection_page("tshirts"))
        .route("/shop/tshirt", collection_page("tshirts"))
        .route("/hoodies", collection_page("hoodies"))
        .route("/shop/hoodie", collection_page("hoodies"))
        .route("/tacticaps", collection_page("tacticaps"))
        .route("/shop/tacticap", collection_page("tacticaps"))
        .route("/cargos", collection_page("cargos"))
        .route("/shop/cargo", collection_page("cargos"))
        .route("/product/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove/{id}", get(cart::remove))
}

/// Create the review routes router.
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::index).post(reviews::submit))
        .route("/delete/{id}", post(reviews::delete))
}

/// Create all routes for the storefront.
pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/size-guide", get(pages::size_guide))
        .route("/contact", get(contact::show).post(contact::submit))
        // Catalog
        .merge(catalog_routes())
        // Cart
        .route("/add-to-cart", post(cart::add_to_cart))
        .nest("/cart", cart_routes())
        // Reviews
        .nest("/reviews", review_routes())
        // Auth
        .merge(auth_routes(state))
}
