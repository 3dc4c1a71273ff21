//! Handlers for room history: commit, list, inspect, revert and the
//! per-file status badges.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use codesphere_core::error::CoreError;
use codesphere_core::status::classify_files;
use codesphere_core::types::DbId;
use codesphere_core::versioning::{resolve_author, validate_commit_message, NO_CHANGES_MESSAGE};
use codesphere_db::models::commit::CreateCommit;
use codesphere_db::repositories::{CommitOutcome, CommitRepo, FileRepo, RevertOutcome};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_room, remember_session_user};
use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;

/// Body returned when none of the selected files changed.
#[derive(Debug, Serialize)]
pub struct NoChangesResponse {
    pub message: &'static str,
}

/// Body returned by a successful revert.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevertResponse {
    pub success: bool,
    pub commit_id: DbId,
    pub restored: Vec<DbId>,
}

/// POST /api/v1/room/{slug}/commit
///
/// Record the selected files that changed since the latest commit. When
/// nothing changed the response is still 200, with
/// `{"message": "No changes to commit"}` instead of a commit.
pub async fn create_commit(
    session: MaybeAuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateCommit>,
) -> AppResult<Response> {
    validate_commit_message(&input.message)?;
    let room = load_room(&state.pool, &slug).await?;
    remember_session_user(&state.pool, &session).await?;
    let author = resolve_author(input.user_id.as_deref(), session.user_id());

    let outcome = CommitRepo::create_if_changed(
        &state.pool,
        room.id,
        &input.message,
        &input.file_ids,
        &author,
    )
    .await
    .map_err(AppError::persistence("create commit"))?;

    match outcome {
        CommitOutcome::Created(commit) => {
            tracing::info!(
                room_id = room.id,
                commit_id = commit.commit.id,
                files = commit.files.len(),
                user_id = %author,
                "Commit created",
            );
            Ok(Json(commit).into_response())
        }
        CommitOutcome::NoChanges => {
            tracing::debug!(room_id = room.id, selected = input.file_ids.len(), "Nothing to commit");
            Ok(Json(NoChangesResponse {
                message: NO_CHANGES_MESSAGE,
            })
            .into_response())
        }
        CommitOutcome::RoomMissing => Err(AppError::Core(CoreError::not_found("Room", &slug))),
    }
}

/// GET /api/v1/room/{slug}/commit
///
/// History of the room, newest first.
pub async fn list_commits(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let room = load_room(&state.pool, &slug).await?;
    let commits = CommitRepo::list_by_room(&state.pool, room.id)
        .await
        .map_err(AppError::persistence("list commits"))?;
    Ok(Json(commits))
}

/// GET /api/v1/room/{slug}/commit/{id}
pub async fn get_commit(
    State(state): State<AppState>,
    Path((slug, commit_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let room = load_room(&state.pool, &slug).await?;
    let commit = CommitRepo::find_with_files(&state.pool, room.id, commit_id)
        .await
        .map_err(AppError::persistence("load commit"))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Commit", commit_id)))?;
    Ok(Json(commit))
}

/// POST /api/v1/room/{slug}/commit/{id}/revert
///
/// Restore the live files recorded by a commit and append a
/// `"Reverted to: ..."` commit. Files deleted since are not recreated.
pub async fn revert_commit(
    session: MaybeAuthUser,
    State(state): State<AppState>,
    Path((slug, commit_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let room = load_room(&state.pool, &slug).await?;
    remember_session_user(&state.pool, &session).await?;
    let author = resolve_author(None, session.user_id());

    let outcome = CommitRepo::revert(&state.pool, room.id, commit_id, &author)
        .await
        .map_err(AppError::persistence("revert commit"))?;

    match outcome {
        RevertOutcome::Reverted { commit, restored } => {
            tracing::info!(
                room_id = room.id,
                target_id = commit_id,
                commit_id = commit.commit.id,
                restored = restored.len(),
                "Commit reverted",
            );
            Ok(Json(RevertResponse {
                success: true,
                commit_id: commit.commit.id,
                restored,
            }))
        }
        RevertOutcome::TargetMissing => {
            Err(AppError::Core(CoreError::not_found("Commit", commit_id)))
        }
        RevertOutcome::RoomMissing => Err(AppError::Core(CoreError::not_found("Room", &slug))),
    }
}

/// GET /api/v1/room/{slug}/status
///
/// `new` / `modified` / `unchanged` for every file against the latest
/// commit. Folders are not listed.
pub async fn room_status(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let room = load_room(&state.pool, &slug).await?;
    let live = FileRepo::list_by_room(&state.pool, room.id)
        .await
        .map_err(AppError::persistence("load status"))?;
    let latest = CommitRepo::latest_files(&state.pool, room.id)
        .await
        .map_err(AppError::persistence("load status"))?;
    Ok(Json(classify_files(&live, &latest)))
}
