mod peer;
mod room;
mod signal;

pub use peer::PeerId;
pub use room::RoomId;
pub use signal::{SignalMessage, SignalPayload};
