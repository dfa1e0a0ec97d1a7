use crate::model::{PeerId, RoomId};
use serde::{Deserialize, Serialize};

/// Kind-specific body of a relayed signaling message. The relay never looks
/// inside `sdp` or `candidate`; they are passed to the receiving peer's
/// WebRTC stack verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SignalPayload {
    #[serde(rename = "offer")]
    Offer { sdp: String },

    #[serde(rename = "answer")]
    Answer { sdp: String },

    #[serde(rename = "ice-candidate", rename_all = "camelCase")]
    IceCandidate {
        candidate: String,
        sdp_mid: String,
        sdp_m_line_index: u32,
    },
}

impl SignalPayload {
    /// Wire name of this message kind, as it appears in the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Offer { .. } => "offer",
            Self::Answer { .. } => "answer",
            Self::IceCandidate { .. } => "ice-candidate",
        }
    }
}

/// One message queued for delivery. `peer_id` is the *sender*; the receiver
/// is implied by whose mailbox the message sits in. `timestamp` is Unix
/// seconds at the moment the relay accepted the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalMessage {
    #[serde(flatten)]
    pub payload: SignalPayload,
    pub room_id: RoomId,
    pub peer_id: PeerId,
    pub timestamp: f64,
}
