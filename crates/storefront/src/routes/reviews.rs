//! Review route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use armour_core::ReviewId;

use crate::error::Result;
use crate::filters;
use crate::models::Review;
use crate::routes::PageContext;
use crate::services::reviews::{ReviewInput, ReviewService};
use crate::state::AppState;

/// Review form data.
///
/// `rating` arrives as text from a `<select>`; anything that is not an
/// integer is treated as out of range.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub product_id: Option<String>,
    pub name: String,
    pub email: String,
    pub rating: String,
    pub message: String,
}

/// Reviews page template.
#[derive(Template, WebTemplate)]
#[template(path = "reviews/index.html")]
pub struct ReviewsTemplate {
    pub ctx: PageContext,
    pub reviews: Vec<Review>,
    /// Always `None`: reviews posted here belong to no product.
    pub review_product_id: Option<String>,
}

/// List all reviews, newest first.
pub async fn index(State(state): State<AppState>, ctx: PageContext) -> Result<impl IntoResponse> {
    let reviews = ReviewService::new(state.storage(), state.notifier(), state.notify_timeout())
        .list()
        .await?;
    Ok(ReviewsTemplate {
        ctx,
        reviews,
        review_product_id: None,
    })
}

/// Store a review and send the confirmation email.
///
/// Redirects to the product page when the review is for a product, otherwise
/// to the reviews list.
#[instrument(skip_all)]
pub async fn submit(State(state): State<AppState>, Form(form): Form<ReviewForm>) -> Result<Redirect> {
    let review = ReviewInput {
        product_id: form.product_id.as_deref(),
        name: &form.name,
        email: &form.email,
        rating: form.rating.trim().parse().unwrap_or(0),
        message: &form.message,
    }
    .validate()?;

    let submitted = ReviewService::new(state.storage(), state.notifier(), state.notify_timeout())
        .submit(review)
        .await?;

    let target = submitted.review.product_id.as_deref().map_or_else(
        || "/reviews".to_string(),
        |id| format!("/product/{}?review_success=true", urlencoding::encode(id)),
    );
    Ok(Redirect::to(&target))
}

/// Delete a review by id and return to the list.
///
/// Unknown or malformed ids are not an error.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    let Ok(review_id) = id.parse::<ReviewId>() else {
        tracing::debug!(%id, "Delete requested for malformed review id");
        return Ok(Redirect::to("/reviews"));
    };

    let removed = ReviewService::new(state.storage(), state.notifier(), state.notify_timeout())
        .delete(review_id)
        .await?;

    if removed {
        tracing::info!(%review_id, "Review deleted");
    } else {
        tracing::debug!(%review_id, "Delete requested for missing review");
    }

    Ok(Redirect::to("/reviews"))
}
