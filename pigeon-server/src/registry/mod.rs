mod mailbox;
mod registry;
mod sweeper;

pub use mailbox::Mailbox;
pub use registry::{RegistryCounts, RoomRegistry, SweepStats};
pub use sweeper::spawn_sweeper;
