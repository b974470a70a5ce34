//! Presentation layer for bloom-checkin
//!
//! This crate contains the CLI definition, output formatting, progress
//! reporting, and the interactive check-in.

pub mod checkin;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use checkin::{pump::SnapshotPump, repl::CheckInRepl, scripted::run_with_answers};
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::ProgressReporter;
