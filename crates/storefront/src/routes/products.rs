//! Product detail handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::Review;
use crate::routes::PageContext;
use crate::routes::collections::collection_path;
use crate::services::reviews::ReviewService;
use crate::state::AppState;

/// Query parameters for the product page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub review_success: Option<String>,
}

/// Product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub ctx: PageContext,
    pub product: Product,
    pub collection_title: String,
    pub collection_path: String,
    pub reviews: Vec<Review>,
    pub review_success: bool,
    /// Hidden `product_id` of the review form.
    pub review_product_id: Option<String>,
}

/// Display a product with its reviews, newest first.
#[instrument(skip(state, ctx))]
pub async fn show(
    State(state): State<AppState>,
    ctx: PageContext,
    Path(id): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let product = catalog
        .product(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    let (collection_title, collection_path) = catalog
        .collection_of(&id)
        .map(|c| (c.title.clone(), collection_path(&c.slug)))
        .unwrap_or_default();

    let reviews = ReviewService::new(state.storage(), state.notifier(), state.notify_timeout())
        .list_for_product(&id)
        .await?;

    Ok(ProductShowTemplate {
        ctx,
        review_product_id: Some(product.id.clone()),
        product: product.clone(),
        collection_title,
        collection_path,
        reviews,
        review_success: query.review_success.as_deref() == Some("true"),
    })
}
