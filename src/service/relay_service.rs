//! Relay service: membership lifecycle and message routing.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::domain::{
    BroadcastReport, Broadcaster, Fanout, Frame, Member, RelayMessage, RoomId, RoomRegistry,
};
use crate::error::RelayError;

/// Coordinates the [`RoomRegistry`] and the [`Broadcaster`].
///
/// Every connection goes through the same three calls: [`join`] once,
/// [`relay`] for each inbound text frame, and [`leave`] once on the way
/// out.
///
/// [`join`]: RelayService::join
/// [`relay`]: RelayService::relay
/// [`leave`]: RelayService::leave
#[derive(Debug, Clone)]
pub struct RelayService {
    registry: Arc<RoomRegistry>,
    broadcaster: Broadcaster,
    outbound_buffer: usize,
}

impl RelayService {
    /// Creates a service over `registry`, giving every member an outbound
    /// queue of `outbound_buffer` frames.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>, outbound_buffer: usize) -> Self {
        Self {
            broadcaster: Broadcaster::new(Arc::clone(&registry)),
            registry,
            outbound_buffer: outbound_buffer.max(1),
        }
    }

    /// Returns a reference to the inner [`RoomRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Adds a new member to `room_id` and announces the new head count to
    /// the whole room, the joiner included.
    ///
    /// Returns the member and the receiving end of its outbound queue,
    /// which the caller must drain into the connection.
    pub async fn join(&self, room_id: RoomId) -> (Member, mpsc::Receiver<Frame>) {
        let (outbox, inbox) = mpsc::channel(self.outbound_buffer);
        let (member, count) = self.registry.join(room_id, outbox).await;
        tracing::info!(room = %member.room_id(), member = %member.id(), members = count, "member joined");

        match RelayMessage::member_joined(count).to_frame() {
            Ok(frame) => {
                self.broadcaster
                    .broadcast_to_all(member.room_id(), &frame)
                    .await;
            }
            Err(e) => tracing::error!(room = %member.room_id(), error = %e, "join notice not sent"),
        }

        (member, inbox)
    }

    /// Removes `member` from its room. Silent: the remaining members are
    /// not notified.
    ///
    /// Returns `false` if the member had already left.
    pub async fn leave(&self, member: &Member) -> bool {
        let removed = self.registry.leave(member.room_id(), member.id()).await;
        if removed {
            let stayed_secs = (Utc::now() - member.joined_at()).num_seconds();
            tracing::info!(room = %member.room_id(), member = %member.id(), stayed_secs, "member left");
        }
        removed
    }

    /// Classifies a text frame from `sender` and forwards it, verbatim, to
    /// the recipients its kind calls for.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedFrame`] if the frame cannot be
    /// classified. Nothing is sent in that case.
    pub async fn relay(&self, sender: &Member, text: &str) -> Result<BroadcastReport, RelayError> {
        let message = RelayMessage::from_client(text)?;
        let frame: Frame = Arc::from(text);
        Ok(self.dispatch(sender, &message, &frame).await)
    }

    /// Sends an already classified message on behalf of `sender`.
    pub async fn dispatch(
        &self,
        sender: &Member,
        message: &RelayMessage,
        frame: &Frame,
    ) -> BroadcastReport {
        let room_id = sender.room_id();
        match message.fanout() {
            Fanout::Nobody => BroadcastReport::default(),
            Fanout::OthersOnly => {
                self.broadcaster
                    .broadcast_excluding(room_id, frame, sender.id())
                    .await
            }
            Fanout::Everyone => self.broadcaster.broadcast_to_all(room_id, frame).await,
        }
    }
}
