//! Check-in session domain.
//!
//! - [`entities::Session`]: the in-progress or completed check-in aggregate
//! - [`error::SessionError`]: precondition violations raised by session operations

pub mod entities;
pub mod error;
