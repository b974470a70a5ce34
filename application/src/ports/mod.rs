//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement,
//! and the snapshot types the presentation layer consumes.

pub mod checkin_gateway;
pub mod session_event;
