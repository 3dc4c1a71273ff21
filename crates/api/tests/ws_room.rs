//! End-to-end test of the room socket over a real TCP listener.
//!
//! The socket path never touches the database, so the pool is lazy and
//! points nowhere.

mod common;

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use codesphere_api::router::build_app_router;
use codesphere_api::state::AppState;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> String {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    let config = common::test_config();
    let app = build_app_router(AppState::new(pool, config.clone()), &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("ws://{addr}/api/v1/ws")
}

/// Next text frame as JSON, skipping control frames.
async fn recv(client: &mut Client) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .unwrap();
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn send(client: &mut Client, frame: Value) {
    client.send(Message::text(frame.to_string())).await.unwrap();
}

async fn connect(url: &str) -> (Client, String) {
    let (mut client, _) = connect_async(url).await.unwrap();
    let hello = recv(&mut client).await;
    assert_eq!(hello["event"], "connected");
    let socket_id = hello["data"]["socketId"].as_str().unwrap().to_string();
    (client, socket_id)
}

#[tokio::test]
async fn peers_see_presence_and_edits() {
    let url = start_server().await;
    let (mut alice, alice_id) = connect(&url).await;
    let (mut bob, bob_id) = connect(&url).await;
    assert_ne!(alice_id, bob_id);

    send(
        &mut alice,
        json!({"event": "join-room", "data": {"roomId": "demo", "user": {"id": "u1", "name": "Alice"}}}),
    )
    .await;
    let users = recv(&mut alice).await;
    assert_eq!(users["event"], "room-users");
    assert_eq!(users["data"]["users"][0]["socketId"], alice_id.as_str());

    send(
        &mut bob,
        json!({"event": "join-room", "data": {"roomId": "demo", "user": {"id": "u2"}}}),
    )
    .await;
    assert_eq!(recv(&mut alice).await["data"]["users"].as_array().unwrap().len(), 2);
    assert_eq!(recv(&mut bob).await["data"]["users"].as_array().unwrap().len(), 2);

    send(
        &mut alice,
        json!({"event": "code-change", "data": {"roomId": "demo", "fileId": 1, "code": "hi", "senderId": alice_id.clone()}}),
    )
    .await;
    let update = recv(&mut bob).await;
    assert_eq!(update, json!({"event": "code-update", "data": {"fileId": 1, "code": "hi"}}));

    // Closing bob's socket must drop him from the room.
    bob.close(None).await.unwrap();
    let after = recv(&mut alice).await;
    assert_eq!(after["event"], "room-users");
    let remaining = after["data"]["users"].as_array().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["socketId"], alice_id.as_str());
}

#[tokio::test]
async fn malformed_frames_are_ignored() {
    let url = start_server().await;
    let (mut client, _) = connect(&url).await;

    client.send(Message::text("not json".to_string())).await.unwrap();
    send(&mut client, json!({"event": "run-code", "data": {}})).await;
    send(
        &mut client,
        json!({"event": "join-room", "data": {"roomId": "demo", "user": {"id": "u1"}}}),
    )
    .await;

    assert_eq!(recv(&mut client).await["event"], "room-users");
}
