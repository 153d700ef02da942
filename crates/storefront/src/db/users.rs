//! `PostgreSQL` credential store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use armour_core::{Email, UserId};

use super::{PgStore, RepositoryError, UserStore, conflict_on_unique, parse_stored_email};
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<(User, String), RepositoryError> {
        let user = User {
            id: UserId::new(self.id),
            name: self.name,
            email: parse_stored_email(&self.email)?,
            created_at: self.created_at,
        };
        Ok((user, self.password_hash))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(
            r"
            INSERT INTO storefront.user (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| conflict_on_unique(e, "email"))?;

        row.into_user().map(|(user, _)| user)
    }

    async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, email, password_hash, created_at
            FROM storefront.user
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        row.map(UserRow::into_user).transpose()
    }
}
