//! A live connection's handle inside a room.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::{MemberId, RoomId};
use crate::error::RelayError;

/// A serialized text frame ready to be written to a socket.
///
/// Shared between all recipients of one broadcast, so cloning it per
/// recipient only bumps a reference count.
pub type Frame = Arc<str>;

/// Outbound queue feeding a single connection's socket writer.
pub type Outbox = mpsc::Sender<Frame>;

/// One connection's participation in a room.
///
/// The member holds the sending half of the connection's outbound queue;
/// the connection task owns the receiving half and writes whatever arrives
/// to the socket. Cloning a `Member` clones the queue handle, not the
/// connection.
#[derive(Debug, Clone)]
pub struct Member {
    id: MemberId,
    room_id: RoomId,
    outbox: Outbox,
    joined_at: DateTime<Utc>,
}

impl Member {
    /// Creates a member of `room_id` delivering into `outbox`.
    #[must_use]
    pub fn new(room_id: RoomId, outbox: Outbox) -> Self {
        Self {
            id: MemberId::new(),
            room_id,
            outbox,
            joined_at: Utc::now(),
        }
    }

    /// Returns the member's identity.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the room this member belongs to.
    #[must_use]
    pub const fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Returns when the member joined.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Enqueues `frame` for this member without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MemberGone`] if the connection task has
    /// dropped its queue, or [`RelayError::MemberBacklogged`] if the queue
    /// is full because the peer is not draining it.
    pub fn deliver(&self, frame: Frame) -> Result<(), RelayError> {
        self.outbox.try_send(frame).map_err(|e| match e {
            TrySendError::Closed(_) => RelayError::MemberGone(self.id),
            TrySendError::Full(_) => RelayError::MemberBacklogged(self.id),
        })
    }
}
