//! Per-file status badges relative to the latest commit.
//!
//! Used by the commit selection UI: each live file is `new`, `modified` or
//! `unchanged` compared to the snapshot recorded by the room's most recent
//! commit. Unlike commit planning, the comparison ignores leading and
//! trailing whitespace.

use serde::{Deserialize, Serialize};

use crate::file_tree::FileKind;
use crate::types::DbId;
use crate::versioning::{recorded_contents, LiveFile, TrackedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    New,
    Modified,
    Unchanged,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Modified => "modified",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one file body against the body recorded for it, if any.
pub fn classify(live: &str, recorded: Option<&str>) -> FileStatus {
    match recorded {
        None => FileStatus::New,
        Some(recorded) if recorded.trim() == live.trim() => FileStatus::Unchanged,
        Some(_) => FileStatus::Modified,
    }
}

/// Status of one live file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatusEntry {
    pub file_id: DbId,
    pub name: String,
    pub status: FileStatus,
}

/// Classify every live file (folders excluded) against the latest snapshot.
///
/// An empty `latest` (room without commits) makes every file `new`.
pub fn classify_files<L: LiveFile, P: TrackedFile>(live: &[L], latest: &[P]) -> Vec<FileStatusEntry> {
    let recorded = recorded_contents(latest);
    live.iter()
        .filter(|file| file.kind() == FileKind::File)
        .map(|file| FileStatusEntry {
            file_id: file.file_id(),
            name: file.name().to_string(),
            status: classify(file.content(), recorded.get(&file.file_id()).copied()),
        })
        .collect()
}
