//! Room presence and mutation relay.
//!
//! [`RoomHub`] owns the in-memory membership table: for each room, the
//! `(socket, user)` pairs currently joined, in join order. Delivery goes
//! through the shared [`WsManager`] channels, so the hub never touches a
//! socket directly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::extract::ws::Message;
use codesphere_core::room_events::{ClientEvent, Relay, RoomMember, RoomUser, ServerEvent};
use tokio::sync::RwLock;

use crate::ws::manager::WsManager;

/// Presence table plus fan-out for one server process.
pub struct RoomHub {
    manager: Arc<WsManager>,
    rooms: RwLock<HashMap<String, Vec<RoomMember>>>,
}

impl RoomHub {
    pub fn new(manager: Arc<WsManager>) -> Self {
        Self {
            manager,
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Route one decoded client frame.
    pub async fn dispatch(&self, socket_id: &str, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom { room_id, user } => {
                self.join(&room_id, socket_id, user).await;
            }
            ClientEvent::LeaveRoom { room_id } => {
                self.leave(&room_id, socket_id).await;
            }
            mutation => {
                if let Some(relay) = mutation.into_relay() {
                    self.relay(socket_id, relay).await;
                }
            }
        }
    }

    /// Add a socket to a room and publish the new list to every member,
    /// the joiner included.
    ///
    /// Entries are not deduplicated by user id: a user with two tabs is
    /// listed twice.
    pub async fn join(&self, room_id: &str, socket_id: &str, user: RoomUser) -> Vec<RoomMember> {
        let mut rooms = self.rooms.write().await;
        let members = rooms.entry(room_id.to_string()).or_default();
        members.push(RoomMember {
            socket_id: socket_id.to_string(),
            user,
        });
        let snapshot = members.clone();
        tracing::debug!(room_id, socket_id, members = snapshot.len(), "Joined room");

        self.publish_members(room_id, &snapshot).await;
        snapshot
    }

    /// Remove every entry of `socket_id` from a room and republish the list
    /// to the remaining members.
    ///
    /// Returns `false` (and publishes nothing) if the socket was not in the
    /// room.
    pub async fn leave(&self, room_id: &str, socket_id: &str) -> bool {
        let mut rooms = self.rooms.write().await;
        let Some(remaining) = Self::remove_socket(&mut rooms, room_id, socket_id) else {
            return false;
        };
        tracing::debug!(room_id, socket_id, members = remaining.len(), "Left room");

        self.publish_members(room_id, &remaining).await;
        true
    }

    /// Drop a vanished socket from every room it had joined.
    ///
    /// All rooms are updated under one write lock. Returns the ids of the
    /// rooms that were left.
    pub async fn disconnect(&self, socket_id: &str) -> Vec<String> {
        let mut rooms = self.rooms.write().await;
        let joined: Vec<String> = rooms
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m.socket_id == socket_id))
            .map(|(room_id, _)| room_id.clone())
            .collect();

        for room_id in &joined {
            if let Some(remaining) = Self::remove_socket(&mut rooms, room_id, socket_id) {
                self.publish_members(room_id, &remaining).await;
            }
        }

        if !joined.is_empty() {
            tracing::debug!(socket_id, rooms = joined.len(), "Socket removed from rooms");
        }
        joined
    }

    /// Forward a mutation to every socket in the room except the sender.
    ///
    /// Returns the number of sockets the event was queued for.
    pub async fn relay(&self, sender_id: &str, relay: Relay) -> usize {
        let Some(message) = encode(&relay.event) else {
            return 0;
        };

        let rooms = self.rooms.read().await;
        let Some(members) = rooms.get(&relay.room_id) else {
            return 0;
        };

        let mut seen = HashSet::new();
        let targets: Vec<&str> = members
            .iter()
            .map(|m| m.socket_id.as_str())
            .filter(|id| *id != sender_id && seen.insert(*id))
            .collect();

        let delivered = self.manager.send_to_many(targets, message).await;
        tracing::trace!(room_id = %relay.room_id, sender_id, delivered, "Relayed room event");
        delivered
    }

    /// Current membership list of a room (empty if nobody joined).
    pub async fn members(&self, room_id: &str) -> Vec<RoomMember> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of rooms with at least one member.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Returns the remaining members, or `None` if the socket was absent.
    /// Rooms left empty are dropped from the table.
    fn remove_socket(
        rooms: &mut HashMap<String, Vec<RoomMember>>,
        room_id: &str,
        socket_id: &str,
    ) -> Option<Vec<RoomMember>> {
        let members = rooms.get_mut(room_id)?;
        let before = members.len();
        members.retain(|m| m.socket_id != socket_id);
        if members.len() == before {
            return None;
        }

        let remaining = members.clone();
        if remaining.is_empty() {
            rooms.remove(room_id);
        }
        Some(remaining)
    }

    async fn publish_members(&self, room_id: &str, members: &[RoomMember]) {
        let event = ServerEvent::RoomUsers {
            room_id: room_id.to_string(),
            users: members.to_vec(),
        };
        let Some(message) = encode(&event) else {
            return;
        };

        let mut seen = HashSet::new();
        let targets: Vec<&str> = members
            .iter()
            .map(|m| m.socket_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect();
        self.manager.send_to_many(targets, message).await;
    }
}

fn encode(event: &ServerEvent) -> Option<Message> {
    match event.to_json() {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode room event");
            None
        }
    }
}
