//! Core domain concepts shared across all subdomains.
//!
//! - [`child::ChildId`]: opaque identity of the child being checked in on
//! - [`error::DomainError`]: value validation errors

pub mod child;
pub mod error;
