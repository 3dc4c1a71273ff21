//! Commit planning and revert rules for room version history.
//!
//! A commit snapshots only the selected files whose content changed since
//! the room's latest commit. Each snapshot row carries the content recorded
//! by that previous commit so history can be displayed as a diff without
//! walking older commits. A revert replays a historical commit's snapshot
//! onto the live files and is itself recorded as a new commit.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::file_tree::FileKind;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Author recorded when no user is attached to the request.
pub const SYSTEM_USER_ID: &str = "system";

/// Payload message returned when a commit request has nothing to record.
pub const NO_CHANGES_MESSAGE: &str = "No changes to commit";

/// Prefix of the message of every commit produced by a revert.
pub const REVERT_MESSAGE_PREFIX: &str = "Reverted to: ";

/// Maximum commit message length in characters.
pub const MAX_COMMIT_MESSAGE_LENGTH: usize = 1_000;

// ---------------------------------------------------------------------------
// File views
// ---------------------------------------------------------------------------

/// Anything that pairs a live file id with a content body: live files and
/// snapshot rows alike.
pub trait TrackedFile {
    fn file_id(&self) -> DbId;
    fn content(&self) -> &str;
}

/// A live room file as seen by the commit planner.
pub trait LiveFile: TrackedFile {
    fn name(&self) -> &str;
    fn language(&self) -> &str;
    fn kind(&self) -> FileKind;
}

/// Index a snapshot by file id.
pub fn recorded_contents<P: TrackedFile>(previous: &[P]) -> HashMap<DbId, &str> {
    previous
        .iter()
        .map(|row| (row.file_id(), row.content()))
        .collect()
}

// ---------------------------------------------------------------------------
// Commit planning
// ---------------------------------------------------------------------------

/// One snapshot row to be written for a new commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotDraft {
    pub file_id: DbId,
    pub name: String,
    pub language: String,
    pub content: String,
    pub old_content: String,
}

/// Select the candidate files that changed since the previous commit.
///
/// Candidates that are not live files of the room, and folders, are
/// ignored. A file with no row in `previous` is new and always selected.
/// Comparison is exact; whitespace-only edits count as changes here.
/// Duplicate candidate ids yield a single draft. Drafts follow the order of
/// `live`.
pub fn plan_commit<L: LiveFile, P: TrackedFile>(
    candidate_ids: &[DbId],
    live: &[L],
    previous: &[P],
) -> Vec<SnapshotDraft> {
    let wanted: HashSet<DbId> = candidate_ids.iter().copied().collect();
    let recorded = recorded_contents(previous);

    live.iter()
        .filter(|file| file.kind() == FileKind::File && wanted.contains(&file.file_id()))
        .filter_map(|file| {
            let old = recorded.get(&file.file_id()).copied();
            if old == Some(file.content()) {
                return None;
            }
            Some(SnapshotDraft {
                file_id: file.file_id(),
                name: file.name().to_string(),
                language: file.language().to_string(),
                content: file.content().to_string(),
                old_content: old.unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Validate a commit message: non-blank and within the length limit.
pub fn validate_commit_message(message: &str) -> Result<(), CoreError> {
    if message.trim().is_empty() {
        return Err(CoreError::Validation(
            "Commit message must not be empty".to_string(),
        ));
    }
    if message.chars().count() > MAX_COMMIT_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Commit message must not exceed {MAX_COMMIT_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Pick the commit author: explicit id from the request, then the session
/// user, then [`SYSTEM_USER_ID`]. Blank ids are treated as absent.
pub fn resolve_author(requested: Option<&str>, session: Option<&str>) -> String {
    requested
        .filter(|id| !id.trim().is_empty())
        .or(session.filter(|id| !id.trim().is_empty()))
        .unwrap_or(SYSTEM_USER_ID)
        .to_string()
}

// ---------------------------------------------------------------------------
// Revert
// ---------------------------------------------------------------------------

/// Message of the commit that records a revert to `original`.
pub fn revert_message(original: &str) -> String {
    format!("{REVERT_MESSAGE_PREFIX}{original}")
}

/// Snapshot rows of the target commit whose live file still exists.
///
/// Rows pointing at deleted files are skipped; a revert never resurrects a
/// file.
pub fn restorable<'a, P: TrackedFile>(target: &'a [P], live_ids: &HashSet<DbId>) -> Vec<&'a P> {
    target
        .iter()
        .filter(|row| live_ids.contains(&row.file_id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Live {
        id: DbId,
        name: &'static str,
        kind: FileKind,
        content: &'static str,
    }

    impl TrackedFile for Live {
        fn file_id(&self) -> DbId {
            self.id
        }
        fn content(&self) -> &str {
            self.content
        }
    }

    impl LiveFile for Live {
        fn name(&self) -> &str {
            self.name
        }
        fn language(&self) -> &str {
            "javascript"
        }
        fn kind(&self) -> FileKind {
            self.kind
        }
    }

    struct Row(DbId, &'static str);

    impl TrackedFile for Row {
        fn file_id(&self) -> DbId {
            self.0
        }
        fn content(&self) -> &str {
            self.1
        }
    }

    fn file(id: DbId, name: &'static str, content: &'static str) -> Live {
        Live {
            id,
            name,
            kind: FileKind::File,
            content,
        }
    }

    // -----------------------------------------------------------------------
    // plan_commit
    // -----------------------------------------------------------------------

    #[test]
    fn first_commit_records_empty_old_content() {
        let live = [file(1, "a.js", "1")];
        let drafts = plan_commit(&[1], &live, &[] as &[Row]);

        assert_eq!(
            drafts,
            vec![SnapshotDraft {
                file_id: 1,
                name: "a.js".into(),
                language: "javascript".into(),
                content: "1".into(),
                old_content: String::new(),
            }]
        );
    }

    #[test]
    fn second_commit_chains_old_content() {
        let live = [file(1, "a.js", "B")];
        let drafts = plan_commit(&[1], &live, &[Row(1, "A")]);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].content, "B");
        assert_eq!(drafts[0].old_content, "A");
    }

    #[test]
    fn unchanged_selection_plans_nothing() {
        let live = [file(1, "a.js", "same"), file(2, "b.js", "also")];
        let previous = [Row(1, "same"), Row(2, "also")];
        assert!(plan_commit(&[1, 2], &live, &previous).is_empty());
    }

    #[test]
    fn whitespace_edit_is_a_change_for_commits() {
        let live = [file(1, "a.js", "x ")];
        assert_eq!(plan_commit(&[1], &live, &[Row(1, "x")]).len(), 1);
    }

    #[test]
    fn only_selected_files_are_considered() {
        let live = [file(1, "a.js", "new"), file(2, "b.js", "new")];
        let drafts = plan_commit(&[2], &live, &[] as &[Row]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].file_id, 2);
    }

    #[test]
    fn unknown_ids_folders_and_duplicates_are_ignored() {
        let live = [
            file(1, "a.js", "x"),
            Live {
                id: 2,
                name: "src",
                kind: FileKind::Folder,
                content: "",
            },
        ];
        let drafts = plan_commit(&[1, 1, 2, 404], &live, &[] as &[Row]);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].file_id, 1);
    }

    #[test]
    fn empty_selection_plans_nothing() {
        let live = [file(1, "a.js", "x")];
        assert!(plan_commit(&[], &live, &[] as &[Row]).is_empty());
    }

    // -----------------------------------------------------------------------
    // Messages and authors
    // -----------------------------------------------------------------------

    #[test]
    fn commit_message_must_not_be_blank() {
        assert!(validate_commit_message("init").is_ok());
        assert!(validate_commit_message("").is_err());
        assert!(validate_commit_message(" \n").is_err());
        assert!(validate_commit_message(&"m".repeat(MAX_COMMIT_MESSAGE_LENGTH + 1)).is_err());
    }

    #[test]
    fn revert_message_prefixes_original() {
        assert_eq!(revert_message("init"), "Reverted to: init");
        assert!(revert_message("").starts_with(REVERT_MESSAGE_PREFIX));
    }

    #[test]
    fn author_falls_back_to_system() {
        assert_eq!(resolve_author(Some("u1"), Some("u2")), "u1");
        assert_eq!(resolve_author(None, Some("u2")), "u2");
        assert_eq!(resolve_author(Some(" "), Some("u2")), "u2");
        assert_eq!(resolve_author(None, None), SYSTEM_USER_ID);
    }

    // -----------------------------------------------------------------------
    // restorable
    // -----------------------------------------------------------------------

    #[test]
    fn deleted_files_are_not_restored() {
        let target = [Row(1, "a"), Row(2, "b"), Row(3, "c")];
        let live: HashSet<DbId> = [1, 3].into_iter().collect();

        let rows: Vec<DbId> = restorable(&target, &live).iter().map(|r| r.0).collect();
        assert_eq!(rows, vec![1, 3]);
    }
}
