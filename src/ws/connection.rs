//! WebSocket connection state machine.
//!
//! A connection moves `Connecting → Active → ClosedGraceful | ClosedError`.
//! While active it multiplexes two sources: text frames from the client,
//! which are relayed to the room, and frames queued for this member by
//! other connections' broadcasts, which are written to the socket. Both
//! closed states end with the member leaving its room.

use std::sync::Arc;

use axum::extract::ws::{Message, Utf8Bytes, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::domain::RoomId;
use crate::error::RelayError;
use crate::service::RelayService;

/// Lifecycle of a single connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake done, not yet a room member.
    Connecting,
    /// Joined; relaying frames.
    Active,
    /// The client closed the socket or the stream ended.
    ClosedGraceful,
    /// A transport error ended the connection.
    ClosedError,
}

impl ConnectionState {
    /// Returns `true` for both terminal states.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::ClosedGraceful | Self::ClosedError)
    }
}

/// What the loop should do with one item read from the socket.
#[derive(Debug)]
enum Inbound {
    Text(Utf8Bytes),
    Ignore,
    Close(ConnectionState),
}

fn classify(item: Option<Result<Message, axum::Error>>) -> Inbound {
    match item {
        Some(Ok(Message::Text(text))) => Inbound::Text(text),
        Some(Ok(Message::Close(_))) | None => Inbound::Close(ConnectionState::ClosedGraceful),
        Some(Ok(Message::Binary(_))) => {
            tracing::debug!("binary frame dropped");
            Inbound::Ignore
        }
        // protocol-level pings are answered by axum
        Some(Ok(Message::Ping(_) | Message::Pong(_))) => Inbound::Ignore,
        Some(Err(e)) => {
            tracing::debug!(error = %e, "websocket read failed");
            Inbound::Close(ConnectionState::ClosedError)
        }
    }
}

/// Runs a connection from join to leave.
///
/// The member is registered in `room_id` before the first frame is read
/// and removed from it once the loop ends, however it ends.
pub async fn run_connection(socket: WebSocket, room_id: RoomId, relay: Arc<RelayService>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut state = ConnectionState::Connecting;
    tracing::trace!(room = %room_id, ?state, "connection accepted");

    let (member, mut inbox) = relay.join(room_id).await;
    state = ConnectionState::Active;

    while !state.is_closed() {
        tokio::select! {
            item = ws_rx.next() => {
                match classify(item) {
                    Inbound::Text(text) => match relay.relay(&member, text.as_str()).await {
                        Ok(report) => {
                            tracing::trace!(member = %member.id(), delivered = report.delivered, failed = report.failed, "frame relayed");
                        }
                        Err(RelayError::MalformedFrame(reason)) => {
                            tracing::debug!(member = %member.id(), %reason, "frame dropped");
                        }
                        Err(e) => {
                            tracing::warn!(member = %member.id(), error = %e, "relay failed");
                        }
                    },
                    Inbound::Ignore => {}
                    Inbound::Close(next) => state = next,
                }
            }
            frame = inbox.recv() => {
                match frame {
                    Some(frame) => {
                        if let Err(e) = ws_tx.send(Message::text(frame.to_string())).await {
                            tracing::debug!(member = %member.id(), error = %e, "websocket write failed");
                            state = ConnectionState::ClosedError;
                        }
                    }
                    // the registry holds the sender until leave, so this only
                    // happens if the member was removed underneath us
                    None => state = ConnectionState::ClosedError,
                }
            }
        }
    }

    relay.leave(&member).await;
    tracing::debug!(room = %member.room_id(), member = %member.id(), ?state, "connection closed");
}
