//! Room socket protocol.
//!
//! Frames are JSON text of the form `{"event": "<name>", "data": {...}}`.
//! Field names inside `data` are camelCase to match the editor client.
//!
//! Presence events (`join-room`, `leave-room`) change room membership and
//! are answered with `room-users`. Every other client event is a mutation
//! that the hub relays, renamed, to the other members of the room; see
//! [`ClientEvent::into_relay`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// The user profile a client announces when joining a room.
///
/// Only `id` is interpreted; every other field is carried through to the
/// membership list untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a room's membership list: a socket plus its user profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomMember {
    pub socket_id: String,
    #[serde(flatten)]
    pub user: RoomUser,
}

// ---------------------------------------------------------------------------
// Client -> server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String, user: RoomUser },

    #[serde(rename_all = "camelCase")]
    LeaveRoom { room_id: String },

    #[serde(rename_all = "camelCase")]
    CodeChange {
        room_id: String,
        file_id: DbId,
        code: String,
        sender_id: String,
    },

    #[serde(rename_all = "camelCase")]
    FileAdd { room_id: String, file: Value },

    #[serde(rename_all = "camelCase")]
    FileDelete { room_id: String, file_id: DbId },

    #[serde(rename_all = "camelCase")]
    FileRename {
        room_id: String,
        file_id: DbId,
        new_name: String,
    },

    #[serde(rename_all = "camelCase")]
    TerminalOutput { room_id: String, output: String },
}

/// A mutation to forward to every room member except the sender.
#[derive(Debug, Clone, PartialEq)]
pub struct Relay {
    pub room_id: String,
    pub event: ServerEvent,
}

impl ClientEvent {
    /// Map a mutation event to the event peers receive.
    ///
    /// Returns `None` for presence events, which the hub handles itself.
    pub fn into_relay(self) -> Option<Relay> {
        let (room_id, event) = match self {
            Self::JoinRoom { .. } | Self::LeaveRoom { .. } => return None,
            Self::CodeChange {
                room_id,
                file_id,
                code,
                ..
            } => (room_id, ServerEvent::CodeUpdate { file_id, code }),
            Self::FileAdd { room_id, file } => (room_id, ServerEvent::FileAdded { file }),
            Self::FileDelete { room_id, file_id } => {
                (room_id, ServerEvent::FileDeleted { file_id })
            }
            Self::FileRename {
                room_id,
                file_id,
                new_name,
            } => (room_id, ServerEvent::FileRenamed { file_id, new_name }),
            Self::TerminalOutput { room_id, output } => {
                (room_id, ServerEvent::TerminalUpdate { output })
            }
        };
        Some(Relay { room_id, event })
    }
}

// ---------------------------------------------------------------------------
// Server -> client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Sent once after the upgrade so the client knows its own socket id.
    #[serde(rename_all = "camelCase")]
    Connected { socket_id: String },

    /// Full membership list of a room after any change.
    #[serde(rename_all = "camelCase")]
    RoomUsers {
        room_id: String,
        users: Vec<RoomMember>,
    },

    #[serde(rename_all = "camelCase")]
    CodeUpdate { file_id: DbId, code: String },

    #[serde(rename_all = "camelCase")]
    FileAdded { file: Value },

    #[serde(rename_all = "camelCase")]
    FileDeleted { file_id: DbId },

    #[serde(rename_all = "camelCase")]
    FileRenamed { file_id: DbId, new_name: String },

    #[serde(rename_all = "camelCase")]
    TerminalUpdate { output: String },
}

impl ServerEvent {
    /// Encode as a JSON text frame body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
