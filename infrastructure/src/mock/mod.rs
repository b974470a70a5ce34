//! Mock check-in backend
//!
//! Implements CheckInGateway entirely in memory, for development and tests
//! without a live service.

pub mod gateway;
mod question_bank;
mod rules;

pub use question_bank::QUESTIONS_PER_CHECK_IN;
