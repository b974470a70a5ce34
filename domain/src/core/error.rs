//! Domain error types

use thiserror::Error;

/// Domain-level validation errors for questionnaire value objects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question id cannot be empty")]
    EmptyQuestionId,

    #[error("Question {0} has an empty prompt")]
    EmptyPrompt(String),

    #[error("Question {0} has no options")]
    NoOptions(String),

    #[error("Unknown gateway mode: {0}")]
    UnknownGatewayMode(String),
}
