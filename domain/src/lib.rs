//! Domain layer for bloom-checkin
//!
//! This crate contains the questionnaire value objects and the check-in
//! session aggregate. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`Session`] is one check-in attempt for a single child: a fixed list of
//! questions, the answers recorded so far and a cursor pointing at the
//! question currently shown. Answers are positional: `answers[i]` belongs to
//! `questions[i]` and is only ever written at the cursor.
//!
//! ## Result
//!
//! Once every question is answered the answers are submitted and the backend
//! returns a [`CheckInResult`]. Attaching it completes the session, which is
//! read-only from then on.

pub mod config;
pub mod core;
pub mod questionnaire;
pub mod session;

// Re-export commonly used types
pub use config::{GatewayMode, OutputFormat};
pub use core::{child::ChildId, error::DomainError};
pub use questionnaire::{
    answer::Answer,
    question::Question,
    recommendation::{CheckInResult, EntryType, HistoryEntry, Recommendation},
};
pub use session::{
    entities::{Advance, Session},
    error::SessionError,
};
