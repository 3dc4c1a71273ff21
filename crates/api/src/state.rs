use std::sync::Arc;

use crate::config::ServerConfig;
use crate::ws::{RoomHub, WsManager};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: codesphere_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (one entry per open socket).
    pub ws_manager: Arc<WsManager>,
    /// Room presence and mutation relay.
    pub room_hub: Arc<RoomHub>,
}

impl AppState {
    /// Build state with a fresh connection manager and room hub.
    pub fn new(pool: codesphere_db::DbPool, config: ServerConfig) -> Self {
        let ws_manager = Arc::new(WsManager::new());
        let room_hub = Arc::new(RoomHub::new(Arc::clone(&ws_manager)));
        Self {
            pool,
            config: Arc::new(config),
            ws_manager,
            room_hub,
        }
    }
}
