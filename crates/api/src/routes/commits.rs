use axum::routing::{get, post};
use axum::Router;

use crate::handlers::commits;
use crate::state::AppState;

/// Room history routes.
///
/// ```text
/// GET  /room/{slug}/status               -> room_status
/// GET  /room/{slug}/commit               -> list_commits
/// POST /room/{slug}/commit               -> create_commit
/// GET  /room/{slug}/commit/{id}          -> get_commit
/// POST /room/{slug}/commit/{id}/revert   -> revert_commit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/room/{slug}/status", get(commits::room_status))
        .route(
            "/room/{slug}/commit",
            get(commits::list_commits).post(commits::create_commit),
        )
        .route("/room/{slug}/commit/{id}", get(commits::get_commit))
        .route("/room/{slug}/commit/{id}/revert", post(commits::revert_commit))
}
