use pigeon_core::SignalMessage;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// A message waiting in a mailbox, paired with the monotonic instant the
/// relay accepted it. The wire-level `timestamp` inside [`SignalMessage`] is
/// wall-clock time; expiry arithmetic only ever uses `queued_at`.
#[derive(Debug, Clone)]
struct Pending {
    message: SignalMessage,
    queued_at: Instant,
}

/// Undelivered messages for one peer in one room, FIFO in append order, plus
/// the instant of that peer's last poll.
#[derive(Debug)]
pub struct Mailbox {
    messages: VecDeque<Pending>,
    last_poll_at: Instant,
}

impl Mailbox {
    pub(crate) fn new(now: Instant) -> Self {
        Self {
            messages: VecDeque::new(),
            last_poll_at: now,
        }
    }

    /// Appends a message at the tail.
    pub(crate) fn push(&mut self, message: SignalMessage, now: Instant) {
        self.messages.push_back(Pending {
            message,
            queued_at: now,
        });
    }

    /// Returns every pending message in append order and clears the mailbox,
    /// recording `now` as the latest poll. `last_poll_at` never moves
    /// backwards.
    pub(crate) fn drain(&mut self, now: Instant) -> Vec<SignalMessage> {
        self.last_poll_at = self.last_poll_at.max(now);
        self.messages.drain(..).map(|p| p.message).collect()
    }

    /// Drops every message older than `max_age`, returning how many were
    /// dropped.
    pub(crate) fn expire(&mut self, now: Instant, max_age: Duration) -> usize {
        let before = self.messages.len();
        self.messages
            .retain(|p| now.duration_since(p.queued_at) <= max_age);
        before - self.messages.len()
    }

    /// An empty mailbox whose peer has not polled for longer than `max_age`
    /// is eligible for eviction. A mailbox with pending messages never is,
    /// however long the peer has been silent.
    pub(crate) fn is_evictable(&self, now: Instant, max_age: Duration) -> bool {
        self.messages.is_empty() && now.duration_since(self.last_poll_at) > max_age
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
