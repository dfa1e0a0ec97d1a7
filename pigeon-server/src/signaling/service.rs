use crate::config::ServerConfig;
use crate::error::SignalingError;
use crate::registry::{RoomRegistry, spawn_sweeper};
use pigeon_core::{PeerId, RoomId, SignalMessage, SignalPayload};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::task::JoinHandle;
use tracing::info;

/// Body of an offer or answer submission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescriptionRequest {
    pub sdp: Option<String>,
    pub room_id: Option<String>,
    pub peer_id: Option<String>,
}

/// Body of an ICE candidate submission. `sdp_mid` and `sdp_m_line_index`
/// are forwarded verbatim; omitted values become `""` and `0`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidateRequest {
    pub candidate: Option<String>,
    pub room_id: Option<String>,
    pub peer_id: Option<String>,
    pub sdp_mid: Option<String>,
    pub sdp_m_line_index: Option<u32>,
}

/// Query string of a poll call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollQuery {
    pub room_id: Option<String>,
    pub peer_id: Option<String>,
}

/// Read-only aggregate view of the relay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    pub port: u16,
    pub rooms: usize,
    pub total_peers: usize,
    pub total_pending_messages: usize,
    pub timestamp: f64,
}

/// The relay's operations: validate a submission, fan it out to the other
/// peers in the room, drain a mailbox on poll, report status. Cheap to
/// clone; every clone shares the same registry.
#[derive(Clone)]
pub struct SignalingService {
    registry: Arc<RoomRegistry>,
    config: ServerConfig,
}

impl SignalingService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: Arc::new(RoomRegistry::new()),
            config,
        }
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Starts the background expiry task with this service's configured
    /// period and message age.
    pub fn spawn_sweeper(&self) -> JoinHandle<()> {
        spawn_sweeper(
            self.registry.clone(),
            self.config.sweep_interval,
            self.config.max_age,
        )
    }

    /// Routes an SDP offer to every other peer in the room. Returns the
    /// fan-out count.
    pub async fn route_offer(
        &self,
        request: SessionDescriptionRequest,
    ) -> Result<usize, SignalingError> {
        let SessionDescriptionRequest {
            sdp,
            room_id,
            peer_id,
        } = request;
        let (Some(sdp), Some(room_id)) = (non_empty(sdp), non_empty(room_id)) else {
            return Err(SignalingError::MissingFields("sdp, roomId"));
        };
        let room_id = RoomId(room_id);
        let sender = PeerId::or_unknown(peer_id);

        let forwarded = self
            .deliver(&room_id, &sender, SignalPayload::Offer { sdp })
            .await;
        info!("[OFFER] Room: {}, From: {}, To: {} peer(s)", room_id, sender, forwarded);
        Ok(forwarded)
    }

    /// Routes an SDP answer to every other peer in the room.
    pub async fn route_answer(
        &self,
        request: SessionDescriptionRequest,
    ) -> Result<usize, SignalingError> {
        let SessionDescriptionRequest {
            sdp,
            room_id,
            peer_id,
        } = request;
        let (Some(sdp), Some(room_id)) = (non_empty(sdp), non_empty(room_id)) else {
            return Err(SignalingError::MissingFields("sdp, roomId"));
        };
        let room_id = RoomId(room_id);
        let sender = PeerId::or_unknown(peer_id);

        let forwarded = self
            .deliver(&room_id, &sender, SignalPayload::Answer { sdp })
            .await;
        info!("[ANSWER] Room: {}, From: {}, To: {} peer(s)", room_id, sender, forwarded);
        Ok(forwarded)
    }

    /// Routes an ICE candidate to every other peer in the room.
    pub async fn route_ice_candidate(
        &self,
        request: IceCandidateRequest,
    ) -> Result<usize, SignalingError> {
        let IceCandidateRequest {
            candidate,
            room_id,
            peer_id,
            sdp_mid,
            sdp_m_line_index,
        } = request;
        let (Some(candidate), Some(room_id)) = (non_empty(candidate), non_empty(room_id)) else {
            return Err(SignalingError::MissingFields("candidate, roomId"));
        };
        let room_id = RoomId(room_id);
        let sender = PeerId::or_unknown(peer_id);

        let payload = SignalPayload::IceCandidate {
            candidate,
            sdp_mid: sdp_mid.unwrap_or_default(),
            sdp_m_line_index: sdp_m_line_index.unwrap_or(0),
        };
        let forwarded = self.deliver(&room_id, &sender, payload).await;
        info!("[ICE] Room: {}, From: {}, To: {} peer(s)", room_id, sender, forwarded);
        Ok(forwarded)
    }

    /// Drains the caller's mailbox, creating the room/peer entry on first
    /// contact. Messages come back in the order they were queued.
    pub async fn poll(&self, query: PollQuery) -> Result<Vec<SignalMessage>, SignalingError> {
        let PollQuery { room_id, peer_id } = query;
        let Some(room_id) = non_empty(room_id) else {
            return Err(SignalingError::MissingParameter("roomId"));
        };
        let room_id = RoomId(room_id);
        let peer = PeerId::or_unknown(peer_id);

        let messages = self.registry.drain(&room_id, &peer).await;
        info!("[POLL] Room: {}, Peer: {}, Messages: {}", room_id, peer, messages.len());
        Ok(messages)
    }

    /// Current counts over the whole registry. Pure read, never fails.
    pub async fn status(&self) -> StatusResponse {
        let counts = self.registry.snapshot_counts().await;
        StatusResponse {
            status: "running",
            port: self.config.port,
            rooms: counts.rooms,
            total_peers: counts.peers,
            total_pending_messages: counts.pending_messages,
            timestamp: unix_now(),
        }
    }

    async fn deliver(&self, room_id: &RoomId, sender: &PeerId, payload: SignalPayload) -> usize {
        let message = SignalMessage {
            payload,
            room_id: room_id.clone(),
            peer_id: sender.clone(),
            timestamp: unix_now(),
        };
        self.registry.fan_out(message).await
    }
}

/// Treats an absent *or empty* string as missing, per the validation rules
/// for required fields.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
