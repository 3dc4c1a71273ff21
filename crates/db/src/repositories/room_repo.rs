//! Repository for the `rooms` table.

use codesphere_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::room::Room;

/// Column list for rooms queries.
const COLUMNS: &str = "id, slug, name, created_at, updated_at";

/// Provides lookup and creation for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a new room, returning the created row.
    ///
    /// A duplicate slug fails with a `uq_rooms_slug` unique violation.
    pub async fn create(pool: &PgPool, slug: &str, name: &str) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (slug, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(slug)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a room by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE slug = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Take the room's row lock for the rest of the transaction.
    ///
    /// Every history write (commit or revert) goes through this lock, so two
    /// writers for the same room never read the same "latest commit".
    /// Returns `false` if the room no longer exists.
    pub async fn lock_for_update(conn: &mut PgConnection, room_id: DbId) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(conn)
            .await?;
        Ok(row.is_some())
    }
}
