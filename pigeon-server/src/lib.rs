mod config;
mod error;
pub mod registry;
pub mod signaling;

pub use config::ServerConfig;
pub use error::SignalingError;
pub use registry::{RegistryCounts, RoomRegistry, SweepStats, spawn_sweeper};
pub use signaling::{
    ForwardResponse, IceCandidateRequest, PollQuery, SessionDescriptionRequest, SignalingService,
    StatusResponse, router,
};
