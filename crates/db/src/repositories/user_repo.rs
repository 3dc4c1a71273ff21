//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, created_at";

/// Mirrors user profiles supplied by the auth provider.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user or refresh the profile of an existing id.
    pub async fn upsert(pool: &PgPool, input: &UpsertUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (id, name, email)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                email = COALESCE(EXCLUDED.email, users.email)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
