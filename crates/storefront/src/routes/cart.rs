//! Cart route handlers.
//!
//! The cart lives in the session. JSON endpoints back the "add to cart"
//! buttons; the cart page and remove links are plain HTML.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use armour_core::{CurrencyCode, Price};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::PageContext;
use crate::services::cart::{Cart, load_cart, save_cart};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Body of `POST /add-to-cart`: a catalog product id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
}

/// Response of `POST /add-to-cart`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCountResponse {
    pub cart_count: u32,
}

/// A price as sent by the browser: either a JSON number or a display string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    fn parse(&self) -> Option<Price> {
        let parsed = match self {
            Self::Number(n) => Price::parse(&n.to_string()),
            Self::Text(s) => Price::parse(s),
        };
        parsed
            .ok()
            .filter(|price| price.currency_code == CurrencyCode::INR)
    }
}

/// Body of `POST /cart/add`: a product described by the client.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub price: PriceInput,
    #[serde(default)]
    pub image: String,
}

/// Response of `POST /cart/add`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl AddItemResponse {
    fn rejected(reason: &'static str) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(Self {
                success: false,
                cart_count: None,
                error: Some(reason),
            }),
        )
            .into_response()
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub ctx: PageContext,
    pub cart: Cart,
}

// =============================================================================
// Handlers
// =============================================================================

/// Add one unit of a catalog product.
#[instrument(skip(state, session))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartCountResponse>> {
    let product = state
        .catalog()
        .product(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let mut cart = load_cart(&session).await;
    let cart_count = cart.add_item(&product.id, &product.name, product.price, &product.image);
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added to cart", &[("product_id", &product.id)]);
    Ok(Json(CartCountResponse { cart_count }))
}

/// Add one unit of a client-described product.
#[instrument(skip(session))]
pub async fn add(session: Session, Json(request): Json<AddItemRequest>) -> Result<Response> {
    let id = request.id.trim();
    if id.is_empty() {
        return Ok(AddItemResponse::rejected("missing product id"));
    }
    let Some(price) = request.price.parse() else {
        tracing::debug!(product_id = %id, price = ?request.price, "Rejected cart price");
        return Ok(AddItemResponse::rejected("invalid price"));
    };

    let mut cart = load_cart(&session).await;
    let cart_count = cart.add_item(id, request.name.trim(), price, request.image.trim());
    save_cart(&session, &cart).await?;

    add_breadcrumb("cart", "Added to cart", &[("product_id", id)]);
    Ok(Json(AddItemResponse {
        success: true,
        cart_count: Some(cart_count),
        error: None,
    })
    .into_response())
}

/// Display the cart page.
pub async fn show(session: Session, ctx: PageContext) -> impl IntoResponse {
    CartShowTemplate {
        ctx,
        cart: load_cart(&session).await,
    }
}

/// Remove a product's line and return to the cart page.
#[instrument(skip(session))]
pub async fn remove(session: Session, Path(product_id): Path<String>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await;

    if cart.remove_item(&product_id) {
        save_cart(&session, &cart).await?;
    } else {
        tracing::debug!(%product_id, "Remove requested for product not in cart");
    }

    Ok(Redirect::to("/cart"))
}
