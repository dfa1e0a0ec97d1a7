use crate::registry::RoomRegistry;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Spawns the recurring expiry pass over `registry`.
///
/// The task has no stop handle; it runs until the process exits. Each pass
/// takes the registry lock once and does only in-memory work, so it never
/// stalls request handling for longer than one scan.
pub fn spawn_sweeper(
    registry: Arc<RoomRegistry>,
    period: Duration,
    max_age: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Expiry sweeper running every {:?}, max message age {:?}",
            period, max_age
        );

        let mut ticker = tokio::time::interval(period);
        // The first tick of an interval completes immediately; skip it so a
        // pass only ever runs a full period after startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let stats = registry.sweep(max_age).await;
            if !stats.is_noop() {
                debug!(
                    "Sweep pass: {} message(s) expired, {} peer(s) evicted, {} room(s) removed",
                    stats.expired_messages, stats.evicted_peers, stats.removed_rooms
                );
            }
        }
    })
}
