//! Infrastructure layer for bloom-checkin
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod factory;
pub mod http;
pub mod mock;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGatewayConfig, FileHttpConfig,
    FileLoggingConfig, FileMockConfig, FileOutputConfig,
};
pub use factory::build_gateway;
pub use http::gateway::HttpCheckInGateway;
pub use mock::gateway::MockCheckInGateway;
