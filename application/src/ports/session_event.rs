//! Snapshot types emitted by SessionController for the presentation layer
//!
//! A view never reads controller internals; it renders the latest
//! [`SessionSnapshot`], either pulled with `snapshot()` or pushed through a
//! subscription after every state-changing operation.

use crate::use_cases::session_controller::ControllerError;
use checkin_domain::Session;

/// Controller superstate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session
    Idle,
    /// Fetching questions
    Loading,
    /// A session is being answered
    Active,
    /// Answers are being submitted
    Submitting,
    /// The session holds a result and is read-only
    Completed,
}

impl SessionState {
    /// Whether a gateway request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionState::Loading | SessionState::Submitting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading => "loading",
            SessionState::Active => "active",
            SessionState::Submitting => "submitting",
            SessionState::Completed => "completed",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    /// Present in Active, Submitting and Completed
    pub session: Option<Session>,
    /// The error from the most recent failed operation, cleared by the next success
    pub last_error: Option<ControllerError>,
}

impl SessionSnapshot {
    pub fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            session: None,
            last_error: None,
        }
    }
}
