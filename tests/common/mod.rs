#![allow(dead_code, clippy::panic)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use location_relay::api::build_router;
use location_relay::app_state::AppState;
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

pub type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Starts a relay on an ephemeral port and returns its address.
pub async fn spawn_relay(page: PathBuf) -> SocketAddr {
    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    let app = build_router(AppState::new(page, 64));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

pub async fn connect(addr: SocketAddr, room: &str) -> Client {
    match tokio_tungstenite::connect_async(format!("ws://{addr}/ws/{room}")).await {
        Ok((ws, _response)) => ws,
        Err(e) => panic!("connect to {room} failed: {e}"),
    }
}

pub async fn send(ws: &mut Client, text: &str) {
    if let Err(e) = ws.send(Message::text(text.to_string())).await {
        panic!("send failed: {e}");
    }
}

/// Waits for the next text frame.
pub async fn recv_text(ws: &mut Client) -> String {
    loop {
        match tokio::time::timeout(Duration::from_secs(2), ws.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => return text.as_str().to_owned(),
            Ok(Some(Ok(_))) => continue,
            Ok(other) => panic!("connection ended: {other:?}"),
            Err(_) => panic!("timed out waiting for a frame"),
        }
    }
}

pub async fn recv_json(ws: &mut Client) -> Value {
    let text = recv_text(ws).await;
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => panic!("frame {text} is not json: {e}"),
    }
}

/// Waits for a `system` notice and returns the count it announces.
pub async fn recv_join_count(ws: &mut Client) -> u64 {
    let value = recv_json(ws).await;
    assert_eq!(value.get("type"), Some(&Value::from("system")), "{value}");
    let Some(msg) = value.get("msg").and_then(Value::as_str) else {
        panic!("system notice without msg: {value}");
    };
    let digits: String = msg.chars().filter(char::is_ascii_digit).collect();
    match digits.parse() {
        Ok(count) => count,
        Err(e) => panic!("no count in {msg}: {e}"),
    }
}

/// Asserts that no text frame arrives within a short window.
pub async fn assert_silent(ws: &mut Client) {
    match tokio::time::timeout(Duration::from_millis(250), ws.next()).await {
        Err(_) => {}
        Ok(Some(Ok(Message::Text(text)))) => panic!("unexpected frame: {}", text.as_str()),
        Ok(other) => panic!("unexpected event: {other:?}"),
    }
}
