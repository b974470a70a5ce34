//! Application layer for bloom-checkin
//!
//! This crate contains the gateway port, the session controller that drives
//! a check-in, and the snapshot types views render. It depends only on the
//! domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    checkin_gateway::{CheckInGateway, GatewayError},
    session_event::{SessionSnapshot, SessionState},
};
pub use use_cases::recommendation_history::{
    RecommendationHistoryError, RecommendationHistoryInput, RecommendationHistoryUseCase,
};
pub use use_cases::session_controller::{ControllerError, ErrorKind, SessionController};
