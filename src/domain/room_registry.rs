//! Process-wide room membership.
//!
//! [`RoomRegistry`] maps each [`RoomId`] to the ordered list of members
//! currently connected to it. A single [`tokio::sync::RwLock`] guards the
//! whole map: joins and leaves take the write half, member snapshots take
//! the read half, so no reader ever observes a member mid-removal.
//!
//! Rooms are created on first join and dropped on last leave. An empty
//! room never stays in the map.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::member::{Member, Outbox};
use super::{MemberId, RoomId};

/// Central store for all active rooms.
///
/// # Concurrency
///
/// - Snapshots of any room may be taken concurrently.
/// - Joins and leaves are serialized against each other and against
///   snapshots.
/// - Broadcasting works off a snapshot and never holds the lock while
///   delivering.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Vec<Member>>>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new member of `room_id` that delivers into `outbox`.
    ///
    /// Creates the room if it does not exist yet. Returns the new member
    /// together with the room size right after the insertion, read under
    /// the same lock so that the Nth joiner always sees `N`.
    pub async fn join(&self, room_id: RoomId, outbox: Outbox) -> (Member, usize) {
        let member = Member::new(room_id.clone(), outbox);
        let mut rooms = self.rooms.write().await;
        let members = rooms.entry(room_id).or_default();
        members.push(member.clone());
        (member, members.len())
    }

    /// Removes `member_id` from `room_id`.
    ///
    /// Returns `true` if the member was present. Calling it again for the
    /// same member is a no-op returning `false`. The room is deleted as
    /// soon as its last member leaves. No departure notice is sent.
    pub async fn leave(&self, room_id: &RoomId, member_id: MemberId) -> bool {
        let mut rooms = self.rooms.write().await;
        let Some(members) = rooms.get_mut(room_id) else {
            return false;
        };
        let before = members.len();
        members.retain(|m| m.id() != member_id);
        let removed = members.len() != before;
        if members.is_empty() {
            rooms.remove(room_id);
        }
        removed
    }

    /// Returns a snapshot of the members of `room_id` in join order.
    ///
    /// Unknown rooms yield an empty list.
    pub async fn members_of(&self, room_id: &RoomId) -> Vec<Member> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns `true` if `room_id` currently has at least one member.
    pub async fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.read().await.contains_key(room_id)
    }

    /// Returns the number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Returns the number of members across all rooms.
    pub async fn member_count(&self) -> usize {
        self.rooms.read().await.values().map(Vec::len).sum()
    }
}
