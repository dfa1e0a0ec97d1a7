pub mod model;

pub use model::{PeerId, RoomId, SignalMessage, SignalPayload};
