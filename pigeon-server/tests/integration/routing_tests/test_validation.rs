use pigeon_server::{PollQuery, SessionDescriptionRequest, SignalingError};

use crate::integration::init_tracing;
use crate::utils::{ice_candidate, offer};

#[tokio::test]
async fn test_submit_without_sdp_is_rejected() {
    init_tracing();
    let service = crate::utils::test_service();

    let request = SessionDescriptionRequest {
        sdp: None,
        room_id: Some("r1".to_string()),
        peer_id: Some("p1".to_string()),
    };
    let err = service
        .route_offer(request)
        .await
        .expect_err("missing sdp must be rejected");

    assert!(matches!(err, SignalingError::MissingFields("sdp, roomId")));
    assert_eq!(err.to_string(), "Missing required fields: sdp, roomId");

    // Nothing was created by the failed call.
    assert_eq!(service.status().await.rooms, 0);
}

#[tokio::test]
async fn test_empty_room_id_counts_as_missing() {
    init_tracing();
    let service = crate::utils::test_service();

    let err = service
        .route_answer(offer("v=0...", "", Some("p1")))
        .await
        .expect_err("empty roomId must be rejected");

    assert!(matches!(err, SignalingError::MissingFields("sdp, roomId")));
    assert_eq!(service.status().await.rooms, 0);
}

#[tokio::test]
async fn test_ice_submit_without_candidate_is_rejected() {
    init_tracing();
    let service = crate::utils::test_service();

    let mut request = ice_candidate("ignored", "r1", Some("p1"));
    request.candidate = None;
    let err = service
        .route_ice_candidate(request)
        .await
        .expect_err("missing candidate must be rejected");

    assert_eq!(
        err.to_string(),
        "Missing required fields: candidate, roomId"
    );
    assert_eq!(service.status().await.rooms, 0);
}

#[tokio::test]
async fn test_poll_without_room_id_is_rejected() {
    init_tracing();
    let service = crate::utils::test_service();

    let err = service
        .poll(PollQuery {
            room_id: None,
            peer_id: Some("p1".to_string()),
        })
        .await
        .expect_err("poll without roomId must be rejected");

    assert!(matches!(err, SignalingError::MissingParameter("roomId")));
    assert_eq!(err.to_string(), "Missing required parameter: roomId");
}
