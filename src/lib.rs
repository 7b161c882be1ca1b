//! # location-relay
//!
//! WebSocket relay for sharing live locations inside named rooms.
//!
//! Clients connect to `/ws/{room_id}` and exchange JSON frames tagged with
//! a `type`: `location` and `status` updates go to everyone else in the
//! room, `flag` markers go to everyone including the sender, and `ping`
//! heartbeats go nowhere. Each join is announced to the room with a
//! `system` notice carrying the new head count. Nothing is stored; rooms
//! exist only while someone is connected to them.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler / connection loop (ws/)
//!     ├── Page + health endpoints (api/)
//!     │
//!     ├── RelayService (service/)
//!     │
//!     ├── Broadcaster (domain/)
//!     └── RoomRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
