pub mod commits;
pub mod files;
pub mod health;
pub mod rooms;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                      room socket
///
/// /rooms                                   create room (POST)
/// /room/{slug}                             room with files
/// /room/{slug}/files                       create file (POST)
/// /room/{slug}/status                      per-file status
/// /room/{slug}/commit                      list, create
/// /room/{slug}/commit/{id}                 commit with files
/// /room/{slug}/commit/{id}/revert          revert (POST)
///
/// /files/{id}                              update (PUT), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .merge(rooms::router())
        .merge(commits::router())
        .merge(files::router())
}
