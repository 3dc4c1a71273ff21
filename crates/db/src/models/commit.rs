//! Commit history models and DTOs.
//!
//! A [`Commit`] owns its [`CommitFile`] snapshot rows. Both are written
//! once and never updated.

use codesphere_core::types::{DbId, Timestamp};
use codesphere_core::versioning::TrackedFile;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A row from the `commits` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub id: DbId,
    pub room_id: DbId,
    pub message: String,
    pub user_id: String,
    pub created_at: Timestamp,
}

/// A row from the `commit_files` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CommitFile {
    pub id: DbId,
    pub commit_id: DbId,
    pub file_id: DbId,
    pub name: String,
    pub language: String,
    pub content: String,
    pub old_content: String,
    pub content_hash: String,
}

impl TrackedFile for CommitFile {
    fn file_id(&self) -> DbId {
        self.file_id
    }

    fn content(&self) -> &str {
        &self.content
    }
}

// ---------------------------------------------------------------------------
// Request DTO
// ---------------------------------------------------------------------------

/// Body of `POST /room/{slug}/commit`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommit {
    pub message: String,
    #[serde(default)]
    pub file_ids: Vec<DbId>,
    pub user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A commit with its snapshot rows.
#[derive(Debug, Serialize)]
pub struct CommitWithFiles {
    #[serde(flatten)]
    pub commit: Commit,
    pub files: Vec<CommitFile>,
}

/// Author of a commit as shown in the history list. `name` and `email` are
/// absent for authors without a `users` row (e.g. `system`).
#[derive(Debug, Clone, Serialize)]
pub struct CommitAuthor {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Joined history row before reshaping into [`CommitSummary`].
#[derive(Debug, Clone, FromRow)]
pub struct CommitSummaryRow {
    pub id: DbId,
    pub message: String,
    pub created_at: Timestamp,
    pub user_id: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

/// One entry of a room's history listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub id: DbId,
    pub message: String,
    pub created_at: Timestamp,
    pub user: CommitAuthor,
}

impl From<CommitSummaryRow> for CommitSummary {
    fn from(row: CommitSummaryRow) -> Self {
        Self {
            id: row.id,
            message: row.message,
            created_at: row.created_at,
            user: CommitAuthor {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
        }
    }
}
