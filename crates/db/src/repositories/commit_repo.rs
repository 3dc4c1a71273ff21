//! Repository for the `commits` and `commit_files` tables.
//!
//! History writes lock the room row first (see
//! [`RoomRepo::lock_for_update`]) so the "latest commit" a writer diffs
//! against cannot move underneath it. Ids are allocated under that lock, so
//! history order is `id DESC`. `created_at` is stamped with
//! `clock_timestamp()` at insert time, not at transaction start.

use std::collections::HashSet;

use codesphere_core::hashing::content_hash;
use codesphere_core::types::DbId;
use codesphere_core::versioning::{self, SnapshotDraft};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::commit::{
    Commit, CommitFile, CommitSummary, CommitSummaryRow, CommitWithFiles,
};
use crate::repositories::{FileRepo, RoomRepo};

/// Column list for commits queries.
const COLUMNS: &str = "id, room_id, message, user_id, created_at";

/// Column list for commit_files queries.
const FILE_COLUMNS: &str =
    "id, commit_id, file_id, name, language, content, old_content, content_hash";

/// Result of a commit request.
#[derive(Debug)]
pub enum CommitOutcome {
    Created(CommitWithFiles),
    /// None of the selected files differ from the latest commit.
    NoChanges,
    /// The room disappeared before the lock was taken.
    RoomMissing,
}

/// Result of a revert request.
#[derive(Debug)]
pub enum RevertOutcome {
    Reverted {
        commit: CommitWithFiles,
        /// Live files that were overwritten.
        restored: Vec<DbId>,
    },
    /// The target commit does not belong to the room.
    TargetMissing,
    RoomMissing,
}

/// Provides history reads and the commit/revert writes.
pub struct CommitRepo;

impl CommitRepo {
    /// List a room's history, newest first, with author profiles.
    pub async fn list_by_room(
        pool: &PgPool,
        room_id: DbId,
    ) -> Result<Vec<CommitSummary>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommitSummaryRow>(
            "SELECT c.id, c.message, c.created_at, c.user_id,
                    u.name AS user_name, u.email AS user_email
             FROM commits c
             LEFT JOIN users u ON u.id = c.user_id
             WHERE c.room_id = $1
             ORDER BY c.id DESC",
        )
        .bind(room_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(CommitSummary::from).collect())
    }

    /// Count commits of a room.
    pub async fn count_by_room(pool: &PgPool, room_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM commits WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Find a commit of a room together with its snapshot rows.
    pub async fn find_with_files(
        pool: &PgPool,
        room_id: DbId,
        id: DbId,
    ) -> Result<Option<CommitWithFiles>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM commits WHERE id = $1 AND room_id = $2");
        let Some(commit) = sqlx::query_as::<_, Commit>(&query)
            .bind(id)
            .bind(room_id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let files = Self::files_of(pool, commit.id).await?;
        Ok(Some(CommitWithFiles { commit, files }))
    }

    /// Snapshot rows of the room's most recent commit (empty if none).
    pub async fn latest_files<'e>(
        executor: impl PgExecutor<'e>,
        room_id: DbId,
    ) -> Result<Vec<CommitFile>, sqlx::Error> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM commit_files
             WHERE commit_id = (
                 SELECT id FROM commits
                 WHERE room_id = $1
                 ORDER BY id DESC
                 LIMIT 1
             )
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, CommitFile>(&query)
            .bind(room_id)
            .fetch_all(executor)
            .await
    }

    /// Record the selected files that changed since the latest commit.
    ///
    /// Runs in one transaction under the room lock. Writes nothing when no
    /// selected file changed. Live files are never modified.
    pub async fn create_if_changed(
        pool: &PgPool,
        room_id: DbId,
        message: &str,
        file_ids: &[DbId],
        user_id: &str,
    ) -> Result<CommitOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !RoomRepo::lock_for_update(&mut *tx, room_id).await? {
            return Ok(CommitOutcome::RoomMissing);
        }

        let live = FileRepo::list_by_room(&mut *tx, room_id).await?;
        let previous = Self::latest_files(&mut *tx, room_id).await?;

        let drafts = versioning::plan_commit(file_ids, &live, &previous);
        if drafts.is_empty() {
            return Ok(CommitOutcome::NoChanges);
        }

        let commit = Self::insert(&mut *tx, room_id, message, user_id, &drafts).await?;
        tx.commit().await?;

        tracing::debug!(
            room_id,
            commit_id = commit.commit.id,
            files = commit.files.len(),
            "Commit recorded"
        );
        Ok(CommitOutcome::Created(commit))
    }

    /// Restore the live files recorded by `target_id` and append a commit
    /// documenting the revert.
    ///
    /// File overwrites and the new commit share one transaction: either all
    /// of them land or none do. Snapshot rows of deleted files are copied
    /// into the new commit but do not resurrect the file.
    pub async fn revert(
        pool: &PgPool,
        room_id: DbId,
        target_id: DbId,
        user_id: &str,
    ) -> Result<RevertOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if !RoomRepo::lock_for_update(&mut *tx, room_id).await? {
            return Ok(RevertOutcome::RoomMissing);
        }

        let query = format!("SELECT {COLUMNS} FROM commits WHERE id = $1 AND room_id = $2");
        let Some(target) = sqlx::query_as::<_, Commit>(&query)
            .bind(target_id)
            .bind(room_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(RevertOutcome::TargetMissing);
        };
        let target_files = Self::files_of(&mut *tx, target.id).await?;

        let live_ids: HashSet<DbId> = FileRepo::list_by_room(&mut *tx, room_id)
            .await?
            .iter()
            .map(|file| file.id)
            .collect();

        let mut restored = Vec::new();
        for row in versioning::restorable(&target_files, &live_ids) {
            if FileRepo::overwrite(&mut *tx, room_id, row.file_id, &row.name, &row.language, &row.content)
                .await?
            {
                restored.push(row.file_id);
            }
        }

        let drafts: Vec<SnapshotDraft> = target_files
            .iter()
            .map(|row| SnapshotDraft {
                file_id: row.file_id,
                name: row.name.clone(),
                language: row.language.clone(),
                content: row.content.clone(),
                old_content: row.old_content.clone(),
            })
            .collect();
        let message = versioning::revert_message(&target.message);
        let commit = Self::insert(&mut *tx, room_id, &message, user_id, &drafts).await?;

        tx.commit().await?;

        tracing::debug!(
            room_id,
            target_id,
            commit_id = commit.commit.id,
            restored = restored.len(),
            "Revert recorded"
        );
        Ok(RevertOutcome::Reverted { commit, restored })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn files_of<'e>(
        executor: impl PgExecutor<'e>,
        commit_id: DbId,
    ) -> Result<Vec<CommitFile>, sqlx::Error> {
        let query = format!(
            "SELECT {FILE_COLUMNS} FROM commit_files WHERE commit_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, CommitFile>(&query)
            .bind(commit_id)
            .fetch_all(executor)
            .await
    }

    /// Insert a commit row and its snapshot rows on an open transaction.
    async fn insert(
        conn: &mut PgConnection,
        room_id: DbId,
        message: &str,
        user_id: &str,
        drafts: &[SnapshotDraft],
    ) -> Result<CommitWithFiles, sqlx::Error> {
        let query = format!(
            "INSERT INTO commits (room_id, message, user_id, created_at)
             VALUES ($1, $2, $3, clock_timestamp())
             RETURNING {COLUMNS}"
        );
        let commit = sqlx::query_as::<_, Commit>(&query)
            .bind(room_id)
            .bind(message)
            .bind(user_id)
            .fetch_one(&mut *conn)
            .await?;

        let file_query = format!(
            "INSERT INTO commit_files
                (commit_id, file_id, name, language, content, old_content, content_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {FILE_COLUMNS}"
        );
        let mut files = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let row = sqlx::query_as::<_, CommitFile>(&file_query)
                .bind(commit.id)
                .bind(draft.file_id)
                .bind(&draft.name)
                .bind(&draft.language)
                .bind(&draft.content)
                .bind(&draft.old_content)
                .bind(content_hash(&draft.content))
                .fetch_one(&mut *conn)
                .await?;
            files.push(row);
        }

        Ok(CommitWithFiles { commit, files })
    }
}
