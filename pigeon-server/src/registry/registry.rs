use crate::registry::Mailbox;
use pigeon_core::{PeerId, RoomId, SignalMessage};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// One room: the peers currently known in it, each with its mailbox.
#[derive(Debug, Default)]
struct Room {
    peers: HashMap<PeerId, Mailbox>,
}

impl Room {
    /// The get-or-create primitive shared by polling and fan-out. A peer
    /// entry appears the first time it polls or the first time a message is
    /// routed to it, whichever happens first.
    fn ensure_peer(&mut self, peer_id: &PeerId, now: Instant) -> &mut Mailbox {
        self.peers
            .entry(peer_id.clone())
            .or_insert_with(|| Mailbox::new(now))
    }
}

/// Aggregate counts over the registry, taken in one consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryCounts {
    pub rooms: usize,
    pub peers: usize,
    pub pending_messages: usize,
}

/// What one sweep pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub expired_messages: usize,
    pub evicted_peers: usize,
    pub removed_rooms: usize,
}

impl SweepStats {
    pub fn is_noop(&self) -> bool {
        self.expired_messages == 0 && self.evicted_peers == 0 && self.removed_rooms == 0
    }
}

/// The single source of truth: every room, peer and undelivered message.
///
/// One lock guards the whole map. Every operation acquires it for the
/// duration of its in-memory work and nothing else, so callers never observe
/// a partially-updated registry and handlers only ever block briefly.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to the mailbox of every peer in the room other than
    /// the sender, creating the room if this is its first mention. Returns
    /// how many peers the message was forwarded to.
    ///
    /// The sender's own entry is never created or written here; only polling
    /// (or being the target of someone else's fan-out) brings a peer into
    /// the registry.
    pub async fn fan_out(&self, message: SignalMessage) -> usize {
        let now = Instant::now();
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(message.room_id.clone()).or_default();

        let mut forwarded = 0;
        for (peer_id, mailbox) in room.peers.iter_mut() {
            if *peer_id == message.peer_id {
                continue;
            }
            mailbox.push(message.clone(), now);
            forwarded += 1;
        }
        forwarded
    }

    /// Returns and clears the peer's mailbox in one step, stamping the poll
    /// time. First contact creates the room and/or peer entry and yields an
    /// empty list. Messages returned here are gone from the registry; a
    /// concurrent or subsequent poll cannot re-observe them.
    pub async fn drain(&self, room_id: &RoomId, peer_id: &PeerId) -> Vec<SignalMessage> {
        let now = Instant::now();
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(room_id.clone()).or_default();
        room.ensure_peer(peer_id, now).drain(now)
    }

    /// Room, peer and pending-message totals in one consistent snapshot.
    pub async fn snapshot_counts(&self) -> RegistryCounts {
        let rooms = self.rooms.lock().await;
        let mut counts = RegistryCounts {
            rooms: rooms.len(),
            peers: 0,
            pending_messages: 0,
        };
        for room in rooms.values() {
            counts.peers += room.peers.len();
            for mailbox in room.peers.values() {
                counts.pending_messages += mailbox.len();
            }
        }
        counts
    }

    /// One full scan-and-prune pass: drop messages older than `max_age`,
    /// evict peers that are empty and have not polled within `max_age`, then
    /// drop rooms left without peers. This is the only mechanism bounding
    /// memory growth from abandoned peers and rooms.
    pub async fn sweep(&self, max_age: Duration) -> SweepStats {
        let now = Instant::now();
        let mut rooms = self.rooms.lock().await;
        let mut stats = SweepStats::default();

        rooms.retain(|_, room| {
            room.peers.retain(|_, mailbox| {
                stats.expired_messages += mailbox.expire(now, max_age);
                if mailbox.is_evictable(now, max_age) {
                    stats.evicted_peers += 1;
                    false
                } else {
                    true
                }
            });
            if room.peers.is_empty() {
                stats.removed_rooms += 1;
                false
            } else {
                true
            }
        });
        stats
    }
}
