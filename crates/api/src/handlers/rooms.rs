//! Handlers for rooms.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use codesphere_core::room::{validate_room_name, validate_slug};
use codesphere_db::models::room::{CreateRoom, RoomWithFiles};
use codesphere_db::repositories::{FileRepo, RoomRepo};

use crate::error::AppResult;
use crate::handlers::load_room;
use crate::state::AppState;

/// POST /api/v1/rooms
///
/// Create an empty room. A taken slug yields 409.
pub async fn create_room(
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    validate_slug(&input.slug)?;
    let name = input.name.as_deref().unwrap_or(input.slug.as_str()).trim();
    validate_room_name(name)?;

    let room = RoomRepo::create(&state.pool, &input.slug, name).await?;
    tracing::info!(room_id = room.id, slug = %room.slug, "Room created");

    Ok((StatusCode::CREATED, Json(room)))
}

/// GET /api/v1/room/{slug}
///
/// Room metadata together with its whole file tree.
pub async fn get_room(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let room = load_room(&state.pool, &slug).await?;
    let files = FileRepo::list_by_room(&state.pool, room.id).await?;

    Ok(Json(RoomWithFiles { room, files }))
}
