use std::time::Duration;

use crate::integration::init_tracing;
use crate::utils::{offer, poll_messages};

#[tokio::test(start_paused = true)]
async fn test_idle_empty_peer_is_evicted_and_empty_room_removed() {
    init_tracing();
    let service = crate::utils::test_service();
    let max_age = service.config().max_age;

    poll_messages(&service, "r1", "p2").await;

    tokio::time::advance(max_age + Duration::from_secs(1)).await;
    let stats = service.registry().sweep(max_age).await;
    assert_eq!(stats.evicted_peers, 1);
    assert_eq!(stats.removed_rooms, 1);

    let status = service.status().await;
    assert_eq!(status.rooms, 0);
    assert_eq!(status.total_peers, 0);
}

#[tokio::test(start_paused = true)]
async fn test_peer_with_pending_mail_is_never_evicted() {
    init_tracing();
    let service = crate::utils::test_service();
    let max_age = service.config().max_age;

    // p2's only poll happens at t=0; the offer lands at t=25 so at t=35 the
    // peer is idle past max_age while its mail is still fresh.
    poll_messages(&service, "r1", "p2").await;
    tokio::time::advance(Duration::from_secs(25)).await;
    service
        .route_offer(offer("v=0...", "r1", Some("p1")))
        .await
        .expect("offer should be accepted");
    tokio::time::advance(Duration::from_secs(10)).await;

    let stats = service.registry().sweep(max_age).await;
    assert_eq!(stats.evicted_peers, 0);

    let status = service.status().await;
    assert_eq!(status.total_peers, 1);
    assert_eq!(status.total_pending_messages, 1);
}

/// A consumer that keeps polling an empty mailbox refreshes its poll stamp
/// every time and is never pruned, however long its counterpart takes to
/// show up.
#[tokio::test(start_paused = true)]
async fn test_active_poller_is_never_evicted() {
    init_tracing();
    let service = crate::utils::test_service();
    let max_age = service.config().max_age;

    poll_messages(&service, "r1", "p2").await;
    for _ in 0..6 {
        tokio::time::advance(Duration::from_secs(15)).await;
        assert!(poll_messages(&service, "r1", "p2").await.is_empty());
        service.registry().sweep(max_age).await;
    }

    let status = service.status().await;
    assert_eq!(status.total_peers, 1, "an active consumer stays registered");
    assert_eq!(status.rooms, 1);
}
