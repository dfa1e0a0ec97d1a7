use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied peer identifier. Opaque to the relay and unique only
/// within a room; there is no registration step, any caller presenting a
/// peer id acts as that peer.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerId(pub String);

impl PeerId {
    /// Id substituted when a caller omits `peerId`.
    pub const UNKNOWN: &'static str = "unknown";

    /// Wraps the supplied id, falling back to [`PeerId::UNKNOWN`] when the
    /// field was absent from the request.
    pub fn or_unknown(id: Option<String>) -> Self {
        Self(id.unwrap_or_else(|| Self::UNKNOWN.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PeerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PeerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
