//! User rows mirrored from the external auth provider.

use codesphere_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: Timestamp,
}

/// Profile data to insert or refresh for a user id.
#[derive(Debug, Deserialize)]
pub struct UpsertUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}
