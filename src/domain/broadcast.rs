//! Fan-out of frames to the members of a room.
//!
//! [`Broadcaster`] snapshots a room's members from the [`RoomRegistry`],
//! releases the registry lock, then enqueues the frame for every selected
//! recipient. Each enqueue is independent: a dead or backlogged recipient
//! is logged and counted, and the pass carries on with the next one.
//! Failed recipients are *not* removed here; removal belongs to the
//! connection teardown path.

use std::sync::Arc;

use super::member::Frame;
use super::{MemberId, RoomId, RoomRegistry};

/// Outcome of one broadcast pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Recipients whose queue accepted the frame.
    pub delivered: usize,
    /// Recipients whose queue was closed or full.
    pub failed: usize,
}

impl BroadcastReport {
    /// Total number of delivery attempts.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Delivers frames to the members of a room.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<RoomRegistry>,
}

impl Broadcaster {
    /// Creates a broadcaster reading membership from `registry`.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Sends `frame` to every member of `room_id` except `excluded`.
    pub async fn broadcast_excluding(
        &self,
        room_id: &RoomId,
        frame: &Frame,
        excluded: MemberId,
    ) -> BroadcastReport {
        self.fan_out(room_id, frame, Some(excluded)).await
    }

    /// Sends `frame` to every member of `room_id`.
    pub async fn broadcast_to_all(&self, room_id: &RoomId, frame: &Frame) -> BroadcastReport {
        self.fan_out(room_id, frame, None).await
    }

    async fn fan_out(
        &self,
        room_id: &RoomId,
        frame: &Frame,
        excluded: Option<MemberId>,
    ) -> BroadcastReport {
        let members = self.registry.members_of(room_id).await;
        let mut report = BroadcastReport::default();

        for member in members.iter().filter(|m| Some(m.id()) != excluded) {
            match member.deliver(Arc::clone(frame)) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(room = %room_id, member = %member.id(), error = %e, "delivery failed");
                    report.failed += 1;
                }
            }
        }

        tracing::trace!(
            room = %room_id,
            delivered = report.delivered,
            failed = report.failed,
            "broadcast complete"
        );
        report
    }
}
