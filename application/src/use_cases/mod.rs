//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod recommendation_history;
pub mod session_controller;
