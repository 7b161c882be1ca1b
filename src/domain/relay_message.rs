//! Messages exchanged inside a room.
//!
//! Every frame on the wire is a JSON object carrying a `type`
//! discriminator. [`RelayMessage`] is the closed set of kinds the relay
//! understands; [`Fanout`] says who receives each kind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::member::Frame;
use crate::error::RelayError;

/// Free-form fields carried by `status` and `flag` messages.
pub type Payload = Map<String, Value>;

/// A classified room message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RelayMessage {
    /// Client heartbeat. Never forwarded.
    Ping,

    /// A member's current position.
    Location {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
        /// Display name shown next to the marker.
        name: String,
        /// Avatar reference (emoji, URL or asset key; opaque to the relay).
        avatar: String,
    },

    /// Ephemeral status bubble.
    Status(Payload),

    /// Shared meeting-point marker.
    Flag(Payload),

    /// Server-authored notice.
    System {
        /// Human-readable text.
        msg: String,
    },
}

/// Which members of a room receive a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fanout {
    /// Nobody. The message is a pure liveness signal.
    Nobody,
    /// Every member except the one who sent it.
    OthersOnly,
    /// Every member, the sender included.
    Everyone,
}

impl RelayMessage {
    /// Builds the notice announcing that the room now has `count` members.
    #[must_use]
    pub fn member_joined(count: usize) -> Self {
        Self::System {
            msg: format!("New member joined! Current count: {count}"),
        }
    }

    /// Classifies a text frame received from a client.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::MalformedFrame`] if the text is not a JSON
    /// object with a known `type` and the fields that type requires, or
    /// if the client tries to send a `system` message.
    pub fn from_client(text: &str) -> Result<Self, RelayError> {
        let message: Self =
            serde_json::from_str(text).map_err(|e| RelayError::MalformedFrame(e.to_string()))?;
        if matches!(message, Self::System { .. }) {
            return Err(RelayError::MalformedFrame(
                "system messages are server-only".to_string(),
            ));
        }
        Ok(message)
    }

    /// Returns the `type` discriminator as it appears on the wire.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Location { .. } => "location",
            Self::Status(_) => "status",
            Self::Flag(_) => "flag",
            Self::System { .. } => "system",
        }
    }

    /// Returns who should receive this message.
    #[must_use]
    pub const fn fanout(&self) -> Fanout {
        match self {
            Self::Ping => Fanout::Nobody,
            Self::Location { .. } | Self::Status(_) => Fanout::OthersOnly,
            Self::Flag(_) | Self::System { .. } => Fanout::Everyone,
        }
    }

    /// Serializes the message into a shareable frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Internal`] if serialization fails.
    pub fn to_frame(&self) -> Result<Frame, RelayError> {
        serde_json::to_string(self)
            .map(Arc::from)
            .map_err(|e| RelayError::Internal(format!("encode {} message: {e}", self.kind())))
    }
}
