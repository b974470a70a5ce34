//! CLI command definitions

use checkin_domain::GatewayMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for check-in results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormat> for checkin_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => checkin_domain::OutputFormat::Text,
            OutputFormat::Json => checkin_domain::OutputFormat::Json,
        }
    }
}

/// Entry type accepted by `--entry-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryTypeArg {
    Initial,
    Checkin,
    Emergency,
}

impl From<EntryTypeArg> for checkin_domain::EntryType {
    fn from(entry_type: EntryTypeArg) -> Self {
        match entry_type {
            EntryTypeArg::Initial => checkin_domain::EntryType::Initial,
            EntryTypeArg::Checkin => checkin_domain::EntryType::Checkin,
            EntryTypeArg::Emergency => checkin_domain::EntryType::Emergency,
        }
    }
}

/// CLI arguments for bloom-checkin
#[derive(Parser, Debug)]
#[command(name = "bloom-checkin")]
#[command(author, version, about = "Guided developmental check-in for a child")]
#[command(long_about = r#"
Bloom Check-in walks a caregiver through a short questionnaire about a child
and shows the recommendations produced from the answers.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. CHECKIN_* environment variables (e.g. CHECKIN_HTTP__API_KEY)
3. ./checkin.toml      Project-level config
4. ~/.config/bloom-checkin/config.toml   Global config

Example:
  bloom-checkin child-42
  bloom-checkin --answers 0,2,1,3,0 child-42
  bloom-checkin --live --history --output json child-42
  bloom-checkin --history --entry-type emergency --limit 5 child-42
"#)]
pub struct Cli {
    /// Child to run the check-in for
    #[arg(required_unless_present = "show_config")]
    pub child_id: Option<String>,

    /// Answer non-interactively with zero-based option indices, one per question
    #[arg(long, value_name = "INDEX", value_delimiter = ',', conflicts_with = "history")]
    pub answers: Option<Vec<usize>>,

    /// Print the child's recommendation history and exit
    #[arg(long)]
    pub history: bool,

    /// Only list history entries of this type
    #[arg(long, value_enum, requires = "history")]
    pub entry_type: Option<EntryTypeArg>,

    /// List at most this many history entries
    #[arg(long, value_name = "N", requires = "history")]
    pub limit: Option<usize>,

    /// Output format (defaults to the config file setting)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Use the built-in mock backend
    #[arg(long, conflicts_with = "live")]
    pub mock: bool,

    /// Use the live HTTP backend
    #[arg(long)]
    pub live: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Gateway mode forced by `--mock` or `--live`
    pub fn gateway_mode(&self) -> Option<GatewayMode> {
        if self.live {
            Some(GatewayMode::Live)
        } else if self.mock {
            Some(GatewayMode::Mock)
        } else {
            None
        }
    }
}
