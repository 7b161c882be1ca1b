//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::RoomId;

/// `GET /ws/{room_id}` upgrades to WebSocket and joins `room_id`.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let relay = Arc::clone(&state.relay);
    let room_id = RoomId::from(room_id);

    ws.on_failed_upgrade(|e: axum::Error| tracing::debug!(error = %e, "websocket upgrade failed"))
        .on_upgrade(move |socket| run_connection(socket, room_id, relay))
}
