mod http;
mod service;

pub use http::{ForwardResponse, router};
pub use service::{
    IceCandidateRequest, PollQuery, SessionDescriptionRequest, SignalingService, StatusResponse,
};
