//! WebSocket layer: upgrade handling and the per-connection loop.
//!
//! Clients connect to `/ws/{room_id}` and stay joined to that room for the
//! lifetime of the socket.

pub mod connection;
pub mod handler;
