//! `PostgreSQL` review store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use armour_core::{Rating, ReviewId};

use super::{PgStore, RepositoryError, ReviewStore, parse_stored_email};
use crate::models::{NewReview, Review};

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    product_id: Option<String>,
    name: String,
    email: String,
    rating: i16,
    message: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = Rating::try_from(i64::from(row.rating))
            .map_err(|e| RepositoryError::DataCorruption(format!("review {}: {e}", row.id)))?;

        Ok(Self {
            id: ReviewId::new(row.id),
            product_id: row.product_id,
            name: row.name,
            email: parse_stored_email(&row.email)?,
            rating,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

fn into_reviews(rows: Vec<ReviewRow>) -> Result<Vec<Review>, RepositoryError> {
    rows.into_iter().map(Review::try_from).collect()
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn create_review(&self, review: &NewReview) -> Result<Review, RepositoryError> {
        let row: ReviewRow = sqlx::query_as(
            r"
            INSERT INTO storefront.review (product_id, name, email, rating, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, name, email, rating, message, created_at
            ",
        )
        .bind(review.product_id.as_deref())
        .bind(&review.name)
        .bind(&review.email)
        .bind(review.rating)
        .bind(&review.message)
        .fetch_one(self.pool())
        .await?;

        Review::try_from(row)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT id, product_id, name, email, rating, message, created_at
            FROM storefront.review
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool())
        .await?;

        into_reviews(rows)
    }

    async fn list_reviews_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r"
            SELECT id, product_id, name, email, rating, message, created_at
            FROM storefront.review
            WHERE product_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await?;

        into_reviews(rows)
    }

    async fn delete_review(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.review WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
