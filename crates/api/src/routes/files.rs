use axum::routing::put;
use axum::Router;

use crate::handlers::files;
use crate::state::AppState;

/// File routes.
///
/// ```text
/// PUT    /files/{id}  -> update_file
/// DELETE /files/{id}  -> delete_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/files/{id}",
        put(files::update_file).delete(files::delete_file),
    )
}
