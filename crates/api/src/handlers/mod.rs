pub mod commits;
pub mod files;
pub mod rooms;

use codesphere_core::error::CoreError;
use codesphere_db::models::room::Room;
use codesphere_db::models::user::UpsertUser;
use codesphere_db::repositories::{RoomRepo, UserRepo};
use codesphere_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;

/// Resolve a room slug or fail with 404.
pub(crate) async fn load_room(pool: &DbPool, slug: &str) -> AppResult<Room> {
    RoomRepo::find_by_slug(pool, slug)
        .await
        .map_err(AppError::persistence("load room"))?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Room", slug)))
}

/// Mirror the session user's profile so history listings can show a name.
pub(crate) async fn remember_session_user(pool: &DbPool, session: &MaybeAuthUser) -> AppResult<()> {
    if let Some(user) = &session.0 {
        let profile = UpsertUser {
            id: user.user_id.clone(),
            name: user.name.clone(),
            email: None,
        };
        UserRepo::upsert(pool, &profile)
            .await
            .map_err(AppError::persistence("save user"))?;
    }
    Ok(())
}
