//! Domain layer: room identity, membership, messages and fan-out.
//!
//! This module holds the relay's core: the [`RoomRegistry`] tracking who is
//! in which room, the [`Broadcaster`] delivering frames to a room, and the
//! [`RelayMessage`] kinds that decide who receives what.

pub mod broadcast;
pub mod member;
pub mod relay_message;
pub mod room_id;
pub mod room_registry;

pub use broadcast::{BroadcastReport, Broadcaster};
pub use member::{Frame, Member, Outbox};
pub use relay_message::{Fanout, RelayMessage};
pub use room_id::{MemberId, RoomId};
pub use room_registry::RoomRegistry;
