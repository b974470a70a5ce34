//! Session precondition errors

use thiserror::Error;

/// Errors raised when a session operation's precondition does not hold
///
/// These are UI-contract violations: a correct view never triggers them,
/// but the session re-checks every precondition anyway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Option {index} is out of range (question has {option_count} options)")]
    InvalidSelection { index: usize, option_count: usize },

    #[error("Question {} has not been answered yet", position + 1)]
    UnansweredQuestion { position: usize },

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("Session is completed and can no longer be changed")]
    AlreadyCompleted,

    #[error("Cannot complete: {answered} of {total} questions answered")]
    IncompleteAnswers { answered: usize, total: usize },

    #[error("A session needs at least one question")]
    EmptyQuestionSet,

    #[error("Duplicate question id: {0}")]
    DuplicateQuestionId(String),
}
