//! Room socket layer: connection registry, heartbeat, presence hub and the
//! upgrade handler that ties them together.

pub mod handler;
pub mod heartbeat;
pub mod manager;
pub mod rooms;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
pub use rooms::RoomHub;
