//! Handlers for live room files.
//!
//! These endpoints carry the durable side of editing: the socket relay only
//! keeps peers in step, while clients persist through `PUT /files/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codesphere_core::error::CoreError;
use codesphere_core::file_tree::{validate_file_name, validate_parent_kind, FileKind};
use codesphere_core::language::Language;
use codesphere_core::types::DbId;
use codesphere_db::models::file::{CreateFile, UpdateFile};
use codesphere_db::repositories::{DeleteOutcome, FileRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::load_room;
use crate::state::AppState;

/// POST /api/v1/room/{slug}/files
///
/// Create a file or folder. Names containing a `.` are files; the language
/// defaults to the one implied by the extension.
pub async fn create_file(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(input): Json<CreateFile>,
) -> AppResult<impl IntoResponse> {
    let room = load_room(&state.pool, &slug).await?;
    validate_file_name(&input.name)?;

    if let Some(parent_id) = input.parent_id {
        let parent = FileRepo::find_by_id(&state.pool, parent_id)
            .await?
            .filter(|parent| parent.room_id == room.id)
            .ok_or_else(|| AppError::Core(CoreError::not_found("File", parent_id)))?;
        validate_parent_kind(FileKind::parse(&parent.kind)?)?;
    }

    let kind = FileKind::infer(&input.name);
    let language = match input.language.as_deref() {
        Some(language) if !language.trim().is_empty() => language.to_string(),
        _ => Language::from_file_name(&input.name).as_str().to_string(),
    };

    let file = FileRepo::create(&state.pool, room.id, &input, kind, &language).await?;
    tracing::info!(
        room_id = room.id,
        file_id = file.id,
        kind = kind.as_str(),
        "File created",
    );

    Ok((StatusCode::CREATED, Json(file)))
}

/// PUT /api/v1/files/{id}
///
/// Auto-save and rename. Absent fields are left unchanged.
pub async fn update_file(
    State(state): State<AppState>,
    Path(file_id): Path<DbId>,
    Json(input): Json<UpdateFile>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_file_name(name)?;
    }

    let file = FileRepo::update(&state.pool, file_id, &input)
        .await
        .map_err(AppError::persistence("update file"))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("File", file_id)))?;

    tracing::debug!(file_id, renamed = input.name.is_some(), "File saved");
    Ok(Json(file))
}

/// DELETE /api/v1/files/{id}
///
/// Delete a file or folder with its whole subtree. Deleting an id that does
/// not exist is a successful no-op.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let outcome = FileRepo::delete_cascade(&state.pool, file_id)
        .await
        .map_err(AppError::persistence("delete file"))?;

    match outcome {
        DeleteOutcome::Deleted(ids) => {
            if !ids.is_empty() {
                tracing::info!(file_id, deleted = ids.len(), "File subtree deleted");
            }
            Ok(StatusCode::NO_CONTENT)
        }
        DeleteOutcome::Rejected(err) => Err(AppError::Core(err)),
    }
}
