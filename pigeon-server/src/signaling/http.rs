use crate::error::SignalingError;
use crate::signaling::service::{
    IceCandidateRequest, PollQuery, SessionDescriptionRequest, SignalingService, StatusResponse,
};
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use pigeon_core::SignalMessage;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

/// Success envelope for the three submit operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardResponse {
    pub success: bool,
    pub message: &'static str,
    pub forwarded_to: usize,
}

impl ForwardResponse {
    fn new(message: &'static str, forwarded_to: usize) -> Self {
        Self {
            success: true,
            message,
            forwarded_to,
        }
    }
}

/// Builds the relay's route table. Signaling is called from browsers on
/// arbitrary origins, so CORS is wide open.
pub fn router(service: SignalingService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/offer", post(handle_offer))
        .route("/answer", post(handle_answer))
        .route("/ice-candidate", post(handle_ice_candidate))
        .route("/messages", get(handle_poll))
        .route("/status", get(handle_status))
        .layer(cors)
        .with_state(service)
}

async fn handle_offer(
    State(service): State<SignalingService>,
    Json(request): Json<SessionDescriptionRequest>,
) -> Result<Json<ForwardResponse>, SignalingError> {
    let forwarded = service.route_offer(request).await?;
    Ok(Json(ForwardResponse::new(
        "Offer received and forwarded",
        forwarded,
    )))
}

async fn handle_answer(
    State(service): State<SignalingService>,
    Json(request): Json<SessionDescriptionRequest>,
) -> Result<Json<ForwardResponse>, SignalingError> {
    let forwarded = service.route_answer(request).await?;
    Ok(Json(ForwardResponse::new(
        "Answer received and forwarded",
        forwarded,
    )))
}

async fn handle_ice_candidate(
    State(service): State<SignalingService>,
    Json(request): Json<IceCandidateRequest>,
) -> Result<Json<ForwardResponse>, SignalingError> {
    let forwarded = service.route_ice_candidate(request).await?;
    Ok(Json(ForwardResponse::new(
        "ICE candidate received and forwarded",
        forwarded,
    )))
}

async fn handle_poll(
    State(service): State<SignalingService>,
    Query(query): Query<PollQuery>,
) -> Result<Json<Vec<SignalMessage>>, SignalingError> {
    let messages = service.poll(query).await?;
    Ok(Json(messages))
}

async fn handle_status(State(service): State<SignalingService>) -> Json<StatusResponse> {
    Json(service.status().await)
}
