//! Check-in Gateway port
//!
//! Defines the interface for talking to the questionnaire backend.

use async_trait::async_trait;
use checkin_domain::{Answer, CheckInResult, ChildId, HistoryEntry, Question};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Not authorized: {0}")]
    Auth(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request rejected: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Gateway to the remote check-in service
///
/// This port defines how the application layer reaches the backend that
/// supplies questions and turns answers into recommendations.
/// Implementations (adapters) live in the infrastructure layer.
///
/// Implementations never retry on their own; retry policy belongs to the
/// caller.
#[async_trait]
pub trait CheckInGateway: Send + Sync {
    /// Fetch the check-in questions for a child
    async fn fetch_questions(&self, child_id: &ChildId) -> Result<Vec<Question>, GatewayError>;

    /// Submit answers and receive the generated result
    ///
    /// Forwards exactly the answers it is given; completeness is the
    /// caller's responsibility.
    async fn submit_answers(
        &self,
        child_id: &ChildId,
        answers: &[Answer],
    ) -> Result<CheckInResult, GatewayError>;

    /// Past results for a child, in the order the backend returns them
    async fn recommendation_history(
        &self,
        child_id: &ChildId,
    ) -> Result<Vec<HistoryEntry>, GatewayError>;
}
