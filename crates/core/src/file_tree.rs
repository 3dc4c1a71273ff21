//! File tree rules for room files.
//!
//! Files form a forest through `parent_id`. This module decides the kind of
//! a new entry, validates names, and computes the order in which a subtree
//! is removed (children strictly before their parent).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length for a file or folder name.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Deepest subtree a cascading delete will walk before refusing.
pub const MAX_TREE_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// File kind
// ---------------------------------------------------------------------------

/// Whether a tree entry holds content or other entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

impl FileKind {
    /// Names containing a `.` are files, everything else is a folder.
    pub fn infer(name: &str) -> Self {
        if name.contains('.') {
            Self::File
        } else {
            Self::Folder
        }
    }

    /// String representation used in the `files.kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }

    /// Parse the database representation. Unknown values are rejected.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            other => Err(CoreError::Internal(format!("Unknown file kind '{other}'"))),
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a file or folder name.
pub fn validate_file_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "File name must not be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(CoreError::Validation(format!(
            "File name '{name}' must not contain path separators"
        )));
    }
    if name.len() > MAX_FILE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "File name must not exceed {MAX_FILE_NAME_LENGTH} characters, got {}",
            name.len()
        )));
    }
    Ok(())
}

/// A new entry may only be placed under a folder.
pub fn validate_parent_kind(parent_kind: FileKind) -> Result<(), CoreError> {
    match parent_kind {
        FileKind::Folder => Ok(()),
        FileKind::File => Err(CoreError::Validation(
            "Parent of a new entry must be a folder".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Cascading delete
// ---------------------------------------------------------------------------

/// Compute the ids to delete for the subtree rooted at `root`.
///
/// `nodes` is every `(id, parent_id)` pair of the room. The result lists
/// each descendant before its parent and ends with `root`. A `root` that is
/// not among `nodes` yields an empty list. Trees deeper than
/// [`MAX_TREE_DEPTH`] (including parent cycles) are rejected before anything
/// is deleted.
pub fn deletion_order(root: DbId, nodes: &[(DbId, Option<DbId>)]) -> Result<Vec<DbId>, CoreError> {
    if !nodes.iter().any(|(id, _)| *id == root) {
        return Ok(Vec::new());
    }

    let mut children: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (id, parent) in nodes {
        if let Some(parent) = parent {
            children.entry(*parent).or_default().push(*id);
        }
    }

    // (id, depth, children already pushed)
    let mut stack: Vec<(DbId, usize, bool)> = vec![(root, 0, false)];
    let mut order = Vec::new();

    while let Some((id, depth, expanded)) = stack.pop() {
        if expanded {
            order.push(id);
            continue;
        }
        if depth >= MAX_TREE_DEPTH {
            return Err(CoreError::Validation(format!(
                "File tree under {root} exceeds the maximum depth of {MAX_TREE_DEPTH}"
            )));
        }
        stack.push((id, depth, true));
        if let Some(kids) = children.get(&id) {
            for kid in kids.iter().rev() {
                stack.push((*kid, depth + 1, false));
            }
        }
    }

    Ok(order)
}
