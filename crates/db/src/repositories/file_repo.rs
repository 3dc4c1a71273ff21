//! Repository for the `files` table.

use codesphere_core::error::CoreError;
use codesphere_core::file_tree::{self, FileKind};
use codesphere_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::file::{CreateFile, RoomFile, UpdateFile};

/// Column list for files queries.
const COLUMNS: &str = "id, room_id, parent_id, name, kind, content, language, created_at, updated_at";

/// Result of a cascading delete.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// Ids removed, descendants before their ancestors. Empty when the file
    /// did not exist.
    Deleted(Vec<DbId>),
    /// The subtree could not be walked safely; nothing was removed.
    Rejected(CoreError),
}

/// Provides CRUD operations for live room files.
pub struct FileRepo;

impl FileRepo {
    /// Insert a new file or folder, returning the created row.
    pub async fn create(
        pool: &PgPool,
        room_id: DbId,
        input: &CreateFile,
        kind: FileKind,
        language: &str,
    ) -> Result<RoomFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO files (room_id, parent_id, name, kind, content, language)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoomFile>(&query)
            .bind(room_id)
            .bind(input.parent_id)
            .bind(&input.name)
            .bind(kind.as_str())
            .bind(input.content.as_deref().unwrap_or_default())
            .bind(language)
            .fetch_one(pool)
            .await
    }

    /// Find a file by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoomFile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files WHERE id = $1");
        sqlx::query_as::<_, RoomFile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every file of a room, roots first, then by name.
    pub async fn list_by_room<'e>(
        executor: impl PgExecutor<'e>,
        room_id: DbId,
    ) -> Result<Vec<RoomFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM files
             WHERE room_id = $1
             ORDER BY parent_id NULLS FIRST, name ASC, id ASC"
        );
        sqlx::query_as::<_, RoomFile>(&query)
            .bind(room_id)
            .fetch_all(executor)
            .await
    }

    /// Update a file (auto-save or rename). Returns `None` if not found.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFile,
    ) -> Result<Option<RoomFile>, sqlx::Error> {
        let query = format!(
            "UPDATE files SET
                name = COALESCE($1, name),
                content = COALESCE($2, content),
                language = COALESCE($3, language),
                updated_at = NOW()
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoomFile>(&query)
            .bind(&input.name)
            .bind(&input.content)
            .bind(&input.language)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite a file with a snapshot's name, language and content.
    ///
    /// Returns `false` if the file is not a live file of `room_id`.
    pub async fn overwrite(
        conn: &mut PgConnection,
        room_id: DbId,
        id: DbId,
        name: &str,
        language: &str,
        content: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE files SET name = $1, language = $2, content = $3, updated_at = NOW()
             WHERE id = $4 AND room_id = $5",
        )
        .bind(name)
        .bind(language)
        .bind(content)
        .bind(id)
        .bind(room_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a file and its whole subtree in one transaction.
    ///
    /// The deletion order comes from [`file_tree::deletion_order`], so every
    /// child row is gone before its parent. Deleting an unknown id succeeds
    /// with an empty list.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<DeleteOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let room: Option<(DbId,)> = sqlx::query_as("SELECT room_id FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((room_id,)) = room else {
            return Ok(DeleteOutcome::Deleted(Vec::new()));
        };

        let nodes: Vec<(DbId, Option<DbId>)> =
            sqlx::query_as("SELECT id, parent_id FROM files WHERE room_id = $1 FOR UPDATE")
                .bind(room_id)
                .fetch_all(&mut *tx)
                .await?;

        let order = match file_tree::deletion_order(id, &nodes) {
            Ok(order) => order,
            Err(err) => return Ok(DeleteOutcome::Rejected(err)),
        };

        for file_id in &order {
            sqlx::query("DELETE FROM files WHERE id = $1")
                .bind(file_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        tracing::debug!(root = id, room_id, count = order.len(), "Deleted file subtree");
        Ok(DeleteOutcome::Deleted(order))
    }
}
