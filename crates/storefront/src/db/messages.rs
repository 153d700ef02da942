//! `PostgreSQL` contact message store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use armour_core::ContactMessageId;

use super::{ContactStore, PgStore, RepositoryError, parse_stored_email};
use crate::models::{ContactMessage, NewContactMessage};

#[derive(sqlx::FromRow)]
struct ContactMessageRow {
    id: i32,
    name: String,
    email: String,
    message: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl ContactStore for PgStore {
    async fn create_message(
        &self,
        message: &NewContactMessage,
    ) -> Result<ContactMessage, RepositoryError> {
        let row: ContactMessageRow = sqlx::query_as(
            r"
            INSERT INTO storefront.contact_message (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            ",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .fetch_one(self.pool())
        .await?;

        Ok(ContactMessage {
            id: ContactMessageId::new(row.id),
            name: row.name,
            email: parse_stored_email(&row.email)?,
            message: row.message,
            created_at: row.created_at,
        })
    }
}
