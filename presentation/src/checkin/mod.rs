//! Driving a check-in session from the terminal

pub mod command;
pub mod pump;
pub mod repl;
pub mod scripted;
