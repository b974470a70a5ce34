//! Session Controller
//!
//! Glues gateway calls to session transitions and owns the
//! Idle/Loading/Active/Submitting/Completed superstate. Every operation that
//! changes state, including failed ones, publishes a [`SessionSnapshot`] to
//! subscribers so a view can render without polling.
//!
//! The controller serves a single UI event loop. The one hazard it guards
//! against is two overlapping gateway requests: while Loading or Submitting
//! every mutating operation fails fast with [`ControllerError::SessionBusy`].
//! The state lock is never held across a gateway call.

use crate::ports::checkin_gateway::{CheckInGateway, GatewayError};
use crate::ports::session_event::{SessionSnapshot, SessionState};
use checkin_domain::{Advance, Answer, CheckInResult, ChildId, Session, SessionError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors surfaced by the controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("No check-in questions are available for this child")]
    NoQuestions,

    #[error("Answer every question before submitting ({answered} of {total} answered)")]
    IncompleteAnswers { answered: usize, total: usize },

    #[error("Another request is still in progress ({0})")]
    SessionBusy(SessionState),

    #[error("No check-in session is active")]
    NoActiveSession,
}

/// Flat error category for choosing a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Auth,
    Server,
    Validation,
    NotFound,
    MalformedResponse,
    InvalidSelection,
    UnansweredQuestion,
    AtFirstQuestion,
    SessionCompleted,
    InvalidQuestionSet,
    NoQuestions,
    IncompleteAnswers,
    SessionBusy,
    NoActiveSession,
}

impl ControllerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ControllerError::Gateway(e) => match e {
                GatewayError::Transport(_) => ErrorKind::Transport,
                GatewayError::Auth(_) => ErrorKind::Auth,
                GatewayError::Server { .. } => ErrorKind::Server,
                GatewayError::Validation(_) => ErrorKind::Validation,
                GatewayError::NotFound(_) => ErrorKind::NotFound,
                GatewayError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            },
            ControllerError::Session(e) => match e {
                SessionError::InvalidSelection { .. } => ErrorKind::InvalidSelection,
                SessionError::UnansweredQuestion { .. } => ErrorKind::UnansweredQuestion,
                SessionError::AtFirstQuestion => ErrorKind::AtFirstQuestion,
                SessionError::AlreadyCompleted => ErrorKind::SessionCompleted,
                SessionError::IncompleteAnswers { .. } => ErrorKind::IncompleteAnswers,
                SessionError::EmptyQuestionSet => ErrorKind::NoQuestions,
                SessionError::DuplicateQuestionId(_) => ErrorKind::InvalidQuestionSet,
            },
            ControllerError::NoQuestions => ErrorKind::NoQuestions,
            ControllerError::IncompleteAnswers { .. } => ErrorKind::IncompleteAnswers,
            ControllerError::SessionBusy(_) => ErrorKind::SessionBusy,
            ControllerError::NoActiveSession => ErrorKind::NoActiveSession,
        }
    }

    /// Whether the error came from the backend rather than a local precondition
    pub fn is_gateway_error(&self) -> bool {
        matches!(self, ControllerError::Gateway(_))
    }
}

struct ControllerInner {
    state: SessionState,
    session: Option<Session>,
    last_error: Option<ControllerError>,
    subscribers: Vec<mpsc::UnboundedSender<SessionSnapshot>>,
}

impl ControllerInner {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            session: self.session.clone(),
            last_error: self.last_error.clone(),
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    fn succeed(&mut self) {
        self.last_error = None;
        self.publish();
    }

    fn fail(&mut self, error: ControllerError) -> ControllerError {
        self.last_error = Some(error.clone());
        self.publish();
        error
    }

    fn reject_if_busy(&mut self) -> Result<(), ControllerError> {
        if self.state.is_busy() {
            let state = self.state;
            debug!(%state, "Rejecting operation while a request is in flight");
            return Err(self.fail(ControllerError::SessionBusy(state)));
        }
        Ok(())
    }
}

/// Settles the controller if an in-flight request is dropped before it resolves
struct InFlight<'a> {
    inner: &'a Mutex<ControllerInner>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(inner: &'a Mutex<ControllerInner>) -> Self {
        Self { inner, armed: true }
    }

    /// The request resolved; the caller applies the outcome itself
    fn resolve(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let state = inner.state;
        inner.state = if inner.session.is_some() {
            SessionState::Active
        } else {
            SessionState::Idle
        };
        warn!(%state, "Request dropped before completing");
        inner.publish();
    }
}

/// Controller for one check-in session at a time
pub struct SessionController<G: CheckInGateway + ?Sized> {
    gateway: Arc<G>,
    inner: Mutex<ControllerInner>,
}

impl<G: CheckInGateway + ?Sized> SessionController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            inner: Mutex::new(ControllerInner {
                state: SessionState::Idle,
                session: None,
                last_error: None,
                subscribers: Vec::new(),
            }),
        }
    }

    // State is only written in whole transitions, so a poisoned lock still
    // holds a consistent value.
    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state, session and last error
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    pub fn state(&self) -> SessionState {
        self.lock().state
    }

    /// Receive a snapshot after every state-changing operation
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionSnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Fetch questions for `child_id` and begin a new session
    ///
    /// Any existing session is discarded. On failure, or if the returned
    /// future is dropped before the fetch resolves, the controller returns to
    /// Idle with no session exposed.
    pub async fn start(&self, child_id: impl Into<ChildId>) -> Result<(), ControllerError> {
        let child_id = child_id.into();

        {
            let mut inner = self.lock();
            inner.reject_if_busy()?;
            if inner.session.take().is_some() {
                debug!("Discarding previous session");
            }
            inner.state = SessionState::Loading;
            inner.last_error = None;
            inner.publish();
        }

        info!(child_id = %child_id, "Fetching check-in questions");
        let in_flight = InFlight::new(&self.inner);
        let fetched = self.gateway.fetch_questions(&child_id).await;
        in_flight.resolve();

        let mut inner = self.lock();
        let outcome = fetched.map_err(ControllerError::from).and_then(|questions| {
            Session::new(child_id.clone(), questions).map_err(|e| match e {
                SessionError::EmptyQuestionSet => ControllerError::NoQuestions,
                other => ControllerError::Session(other),
            })
        });

        match outcome {
            Ok(session) => {
                info!(
                    child_id = %child_id,
                    question_count = session.questions().len(),
                    "Check-in session started"
                );
                inner.session = Some(session);
                inner.state = SessionState::Active;
                inner.succeed();
                Ok(())
            }
            Err(error) => {
                warn!(child_id = %child_id, %error, "Failed to start check-in session");
                inner.state = SessionState::Idle;
                Err(inner.fail(error))
            }
        }
    }

    /// Record the option at `selected_index` for the current question
    pub fn answer(&self, selected_index: usize) -> Result<Answer, ControllerError> {
        self.with_session("answer", |session| {
            session.record_answer(selected_index).cloned()
        })
    }

    /// Move to the next question, or signal that the session is ready to submit
    pub fn next(&self) -> Result<Advance, ControllerError> {
        self.with_session("next", Session::advance)
    }

    /// Move back one question
    pub fn previous(&self) -> Result<usize, ControllerError> {
        self.with_session("previous", Session::retreat)
    }

    /// Submit every answer and complete the session with the returned result
    ///
    /// Rejected without contacting the gateway unless every question has an
    /// answer. On gateway failure, or if the returned future is dropped
    /// mid-request, the session stays Active and unchanged so the caller can
    /// retry.
    pub async fn submit(&self) -> Result<CheckInResult, ControllerError> {
        let (child_id, answers) = {
            let mut inner = self.lock();
            inner.reject_if_busy()?;

            let prepared = match inner.session.as_ref() {
                None => Err(ControllerError::NoActiveSession),
                Some(session) if session.is_completed() => {
                    Err(ControllerError::Session(SessionError::AlreadyCompleted))
                }
                Some(session) if !session.is_complete() => {
                    Err(ControllerError::IncompleteAnswers {
                        answered: session.answers().len(),
                        total: session.questions().len(),
                    })
                }
                Some(session) => Ok((session.child_id().clone(), session.answers().to_vec())),
            };

            match prepared {
                Ok(prepared) => {
                    inner.state = SessionState::Submitting;
                    inner.last_error = None;
                    inner.publish();
                    prepared
                }
                Err(error) => {
                    debug!(%error, "Submit rejected");
                    return Err(inner.fail(error));
                }
            }
        };

        info!(child_id = %child_id, answer_count = answers.len(), "Submitting check-in");
        let in_flight = InFlight::new(&self.inner);
        let submitted = self.gateway.submit_answers(&child_id, &answers).await;
        in_flight.resolve();

        let mut inner = self.lock();
        let outcome = submitted
            .map_err(ControllerError::from)
            .and_then(|result| match inner.session.as_mut() {
                Some(session) => session
                    .complete(result.clone())
                    .map(|()| result)
                    .map_err(ControllerError::from),
                None => Err(ControllerError::NoActiveSession),
            });

        match outcome {
            Ok(result) => {
                info!(
                    child_id = %child_id,
                    recommendation_count = result.recommendations.len(),
                    "Check-in completed"
                );
                inner.state = SessionState::Completed;
                inner.succeed();
                Ok(result)
            }
            Err(error) => {
                warn!(child_id = %child_id, %error, "Check-in submission failed");
                inner.state = if inner.session.is_some() {
                    SessionState::Active
                } else {
                    SessionState::Idle
                };
                Err(inner.fail(error))
            }
        }
    }

    /// Discard the current session and return to Idle
    ///
    /// Rejected with [`ControllerError::SessionBusy`] while a request is in
    /// flight.
    pub fn reset(&self) -> Result<(), ControllerError> {
        let mut inner = self.lock();
        inner.reject_if_busy()?;
        if inner.session.take().is_some() {
            debug!("Session reset");
        }
        inner.state = SessionState::Idle;
        inner.succeed();
        Ok(())
    }

    fn with_session<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, ControllerError> {
        let mut inner = self.lock();
        inner.reject_if_busy()?;

        let outcome = match inner.session.as_mut() {
            Some(session) => f(session).map_err(ControllerError::from),
            None => Err(ControllerError::NoActiveSession),
        };

        match outcome {
            Ok(value) => {
                inner.succeed();
                Ok(value)
            }
            Err(error) => {
                debug!(operation, %error, "Session operation rejected");
                Err(inner.fail(error))
            }
        }
    }
}
