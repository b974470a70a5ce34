//! CLI entrypoint for Bloom Check-in
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use checkin_application::{
    RecommendationHistoryInput, RecommendationHistoryUseCase, SessionController,
};
use checkin_domain::OutputFormat;
use checkin_infrastructure::{ConfigLoader, FileConfig, build_gateway};
use checkin_presentation::{
    CheckInRepl, Cli, ConsoleFormatter, ProgressReporter, SnapshotPump, run_with_answers,
};
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Placeholder shown instead of secrets in `--show-config`
const REDACTED: &str = "********";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(mode) = cli.gateway_mode() {
        config.gateway.mode = mode;
    }

    if cli.show_config {
        print_config(&cli, &config)?;
        return Ok(());
    }

    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!(mode = %config.gateway.mode, "Starting Bloom Check-in");

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let Some(child_id) = cli.child_id.clone() else {
        bail!("A child id is required");
    };
    let format = cli
        .output
        .map(OutputFormat::from)
        .unwrap_or(config.output.format);
    let show_progress = !cli.quiet && config.output.show_progress;

    // === Dependency Injection ===
    let gateway = build_gateway(&config)?;

    // History mode
    if cli.history {
        let use_case = RecommendationHistoryUseCase::new(gateway);
        let mut input = RecommendationHistoryInput::new(child_id);
        if let Some(entry_type) = cli.entry_type {
            input = input.only(entry_type.into());
        }
        if let Some(limit) = cli.limit {
            input = input.with_limit(limit);
        }
        let entries = use_case.execute(input).await?;

        let output = match format {
            OutputFormat::Text => ConsoleFormatter::history(&entries),
            OutputFormat::Json => ConsoleFormatter::history_json(&entries),
        };
        println!("{}", output);
        return Ok(());
    }

    // Scripted mode
    if let Some(answers) = &cli.answers {
        let controller = SessionController::new(gateway);
        let progress = if show_progress {
            ProgressReporter::new()
        } else {
            ProgressReporter::hidden()
        };
        let mut pump = SnapshotPump::new(controller.subscribe(), progress);

        let result = run_with_answers(&controller, &mut pump, child_id.into(), answers).await?;

        let output = match format {
            OutputFormat::Text => ConsoleFormatter::result(&result),
            OutputFormat::Json => ConsoleFormatter::result_json(&result),
        };
        println!("{}", output);
        return Ok(());
    }

    // Interactive mode
    let repl = CheckInRepl::new(gateway, child_id).with_progress(show_progress);
    repl.run().await?;

    Ok(())
}

/// Install the tracing subscriber
///
/// `RUST_LOG` wins over `-v`. With a log file configured, output goes there
/// so it does not interleave with the prompt; the returned guard flushes it.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Log file path has no file name: {}", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy().into_owned())
        .build(dir)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

/// Print configuration sources and the merged result, secrets redacted
fn print_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    if cli.no_config {
        println!("Configuration files disabled by --no-config, using defaults");
    } else {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
    }

    let mut shown = config.clone();
    if shown.http.api_key.is_some() {
        shown.http.api_key = Some(REDACTED.to_string());
    }
    if shown.http.bearer_token.is_some() {
        shown.http.bearer_token = Some(REDACTED.to_string());
    }

    println!();
    println!("Effective configuration:");
    println!(
        "{}",
        toml::to_string_pretty(&shown).context("Failed to render configuration")?
    );

    if let Err(e) = config.validate() {
        println!("Warning: {}", e);
    }
    Ok(())
}
