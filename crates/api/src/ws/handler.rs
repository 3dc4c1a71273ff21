use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use codesphere_core::room_events::{ClientEvent, ServerEvent};
use futures::{SinkExt, StreamExt};

use crate::middleware::auth::MaybeAuthUser;
use crate::state::AppState;
use crate::ws::manager::WsManager;
use crate::ws::rooms::RoomHub;

/// HTTP handler that upgrades the connection to a room socket.
///
/// A bearer token is optional; when present its user id is recorded on the
/// connection.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    session: MaybeAuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let user_id = session.user_id().map(str::to_string);
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state.ws_manager, state.room_hub))
}

/// Manage a single socket after upgrade.
///
///   1. Registers the connection and announces its id with `connected`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Decodes inbound text frames and hands them to the room hub.
///   4. On disconnect, removes the socket from every room, then from the
///      manager.
async fn handle_socket(
    socket: WebSocket,
    user_id: Option<String>,
    ws_manager: Arc<WsManager>,
    room_hub: Arc<RoomHub>,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id = ?user_id, "Room socket connected");

    let mut rx = ws_manager.add(conn_id.clone(), user_id).await;

    let hello = ServerEvent::Connected {
        socket_id: conn_id.clone(),
    };
    match hello.to_json() {
        Ok(json) => {
            ws_manager.send_to(&conn_id, Message::Text(json.into())).await;
        }
        Err(e) => tracing::error!(conn_id = %conn_id, error = %e, "Failed to encode handshake"),
    }

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "Room socket sink closed");
                break;
            }
            if closing {
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => room_hub.dispatch(&conn_id, event).await,
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed room frame");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Room socket receive error");
                break;
            }
        }
    }

    room_hub.disconnect(&conn_id).await;
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Room socket disconnected");
}
