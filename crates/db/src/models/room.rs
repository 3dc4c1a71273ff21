//! Room models and DTOs.

use codesphere_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::file::RoomFile;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `rooms` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a room. `name` defaults to the slug.
#[derive(Debug, Deserialize)]
pub struct CreateRoom {
    pub slug: String,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A room together with its whole file tree.
#[derive(Debug, Serialize)]
pub struct RoomWithFiles {
    #[serde(flatten)]
    pub room: Room,
    pub files: Vec<RoomFile>,
}
