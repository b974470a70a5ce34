//! Configuration file loading for bloom-checkin
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `CHECKIN_*` environment variables
//! 3. Project root: `./checkin.toml` or `./.checkin.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/bloom-checkin/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileGatewayConfig, FileHttpConfig, FileLoggingConfig,
    FileMockConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
