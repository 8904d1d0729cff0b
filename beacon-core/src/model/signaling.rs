use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire protocol shared by the push relay and the pull store.
///
/// Every frame is `{ "type": ..., "room": ..., "payload"?: ... }`. The
/// `payload` is an SDP blob or ICE candidate descriptor and is never
/// inspected, only carried verbatim. `user-joined`/`user-left` are
/// server-originated; the rest come from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    Join {
        room: String,
    },
    Leave {
        room: String,
    },
    Offer {
        room: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    Answer {
        room: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    IceCandidate {
        room: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    UserJoined {
        room: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
    UserLeft {
        room: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        payload: Option<Value>,
    },
}

impl SignalMessage {
    /// The room the frame is addressed to.
    pub fn room(&self) -> &str {
        match self {
            SignalMessage::Join { room }
            | SignalMessage::Leave { room }
            | SignalMessage::Offer { room, .. }
            | SignalMessage::Answer { room, .. }
            | SignalMessage::IceCandidate { room, .. }
            | SignalMessage::UserJoined { room, .. }
            | SignalMessage::UserLeft { room, .. } => room,
        }
    }
}
