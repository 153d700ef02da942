//! Shopping cart.
//!
//! [`Cart`] is a plain value with no knowledge of HTTP. The session is only
//! where it is kept between requests: handlers call [`load_cart`], mutate,
//! then [`save_cart`]. Two concurrent writers for one session are
//! last-write-wins.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use armour_core::{CurrencyCode, Price};

use crate::models::session_keys;

/// One product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity, `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_times(self.quantity)
    }
}

/// Ordered cart lines, at most one per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// An existing line for `product_id` has its quantity bumped; otherwise a
    /// new line with quantity 1 is appended. Returns the total item count.
    pub fn add_item(&mut self, product_id: &str, name: &str, price: Price, image: &str) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product_id: product_id.to_owned(),
                name: name.to_owned(),
                price,
                image: image.to_owned(),
                quantity: 1,
            });
        }
        self.item_count()
    }

    /// Remove every line for `product_id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of line totals in the store currency.
    ///
    /// `None` if a total overflows or a line is priced in another currency.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.lines
            .iter()
            .try_fold(Price::zero(CurrencyCode::INR), |acc, line| {
                acc.checked_add(line.line_total()?)
            })
    }
}

/// Read the session's cart. Missing or unreadable data is an empty cart.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(session_keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable cart");
            Cart::default()
        }
    }
}

/// Persist the cart into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}
