//! End-to-end WebSocket relay tests against a live server.

#![allow(clippy::panic)]

mod common;

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;

use common::{assert_silent, connect, recv_join_count, recv_json, recv_text, send, spawn_relay};

fn no_page() -> PathBuf {
    PathBuf::from("no-such-page.html")
}

#[tokio::test]
async fn location_then_join_then_flag() {
    let addr = spawn_relay(no_page()).await;

    let mut a = connect(addr, "abc").await;
    assert_eq!(recv_join_count(&mut a).await, 1);
    let mut b = connect(addr, "abc").await;
    assert_eq!(recv_join_count(&mut a).await, 2);
    assert_eq!(recv_join_count(&mut b).await, 2);

    let location = r#"{"type":"location","lat":1,"lng":2,"name":"A","avatar":"x"}"#;
    send(&mut a, location).await;
    assert_eq!(recv_text(&mut b).await, location);
    assert_silent(&mut a).await;

    let mut c = connect(addr, "abc").await;
    for ws in [&mut a, &mut b, &mut c] {
        assert_eq!(recv_join_count(ws).await, 3);
    }

    let flag = r#"{"type":"flag","lat":5,"lng":6}"#;
    send(&mut b, flag).await;
    for ws in [&mut a, &mut b, &mut c] {
        assert_eq!(recv_text(ws).await, flag);
    }
}

#[tokio::test]
async fn status_skips_sender_and_ping_is_swallowed() {
    let addr = spawn_relay(no_page()).await;
    let mut a = connect(addr, "walk").await;
    recv_join_count(&mut a).await;
    let mut b = connect(addr, "walk").await;
    recv_join_count(&mut a).await;
    recv_join_count(&mut b).await;

    send(&mut a, r#"{"type":"ping"}"#).await;
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;

    let status = r#"{"type":"status","name":"A","text":"grabbing coffee"}"#;
    send(&mut a, status).await;
    let received = recv_json(&mut b).await;
    assert_eq!(received.get("text"), Some(&Value::from("grabbing coffee")));
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn rooms_do_not_leak() {
    let addr = spawn_relay(no_page()).await;
    let mut north = connect(addr, "north").await;
    assert_eq!(recv_join_count(&mut north).await, 1);
    let mut south = connect(addr, "south").await;
    assert_eq!(recv_join_count(&mut south).await, 1);

    send(&mut north, r#"{"type":"flag","lat":0,"lng":0}"#).await;
    recv_text(&mut north).await;
    assert_silent(&mut south).await;
}

#[tokio::test]
async fn malformed_frames_keep_the_connection_open() {
    let addr = spawn_relay(no_page()).await;
    let mut a = connect(addr, "abc").await;
    recv_join_count(&mut a).await;
    let mut b = connect(addr, "abc").await;
    recv_join_count(&mut a).await;
    recv_join_count(&mut b).await;

    send(&mut a, "definitely not json").await;
    send(&mut a, r#"{"type":"location","lat":1}"#).await;
    send(&mut a, r#"{"type":"system","msg":"fake"}"#).await;
    assert_silent(&mut b).await;

    let flag = r#"{"type":"flag","lat":9,"lng":9}"#;
    send(&mut a, flag).await;
    assert_eq!(recv_text(&mut a).await, flag);
    assert_eq!(recv_text(&mut b).await, flag);
}

#[tokio::test]
async fn departure_is_silent_and_frees_the_slot() {
    let addr = spawn_relay(no_page()).await;
    let mut a = connect(addr, "abc").await;
    recv_join_count(&mut a).await;
    let mut b = connect(addr, "abc").await;
    recv_join_count(&mut a).await;
    recv_join_count(&mut b).await;

    if let Err(e) = b.close(None).await {
        panic!("close failed: {e}");
    }
    assert_silent(&mut a).await;

    // the next joiner is counted without the departed member
    tokio::time::sleep(Duration::from_millis(50)).await;
    let mut c = connect(addr, "abc").await;
    assert_eq!(recv_join_count(&mut a).await, 2);
    assert_eq!(recv_join_count(&mut c).await, 2);
}
