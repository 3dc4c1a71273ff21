use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{files, rooms};
use crate::state::AppState;

/// Room routes.
///
/// ```text
/// POST /rooms               -> create_room
/// GET  /room/{slug}         -> get_room
/// POST /room/{slug}/files   -> create_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(rooms::create_room))
        .route("/room/{slug}", get(rooms::get_room))
        .route("/room/{slug}/files", post(files::create_file))
}
