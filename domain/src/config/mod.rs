//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod gateway_mode;
mod output_format;

pub use gateway_mode::GatewayMode;
pub use output_format::OutputFormat;
