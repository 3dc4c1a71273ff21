//! Live room file models and DTOs.

use codesphere_core::file_tree::FileKind;
use codesphere_core::types::{DbId, Timestamp};
use codesphere_core::versioning::{LiveFile, TrackedFile};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `files` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoomFile {
    pub id: DbId,
    pub room_id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    /// `file` or `folder`.
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub language: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TrackedFile for RoomFile {
    fn file_id(&self) -> DbId {
        self.id
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl LiveFile for RoomFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn kind(&self) -> FileKind {
        // The column is constrained to the two values.
        if self.kind == FileKind::Folder.as_str() {
            FileKind::Folder
        } else {
            FileKind::File
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a file or folder. The kind is inferred from the name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFile {
    pub name: String,
    pub parent_id: Option<DbId>,
    pub content: Option<String>,
    pub language: Option<String>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for auto-save and rename (all fields optional).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFile {
    pub name: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}
