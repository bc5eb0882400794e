//! chime - one-shot alarm tools for agent hosts.
//!
//! Main entry point for the chime console host.

mod console;
mod register;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chime_config::{Config, ConfigError, ConfigLoader, ConfigValidator, LoggingConfig};
use chime_core::Kernel;
use chime_scheduler::Scheduler;

/// chime CLI.
#[derive(Parser, Debug)]
#[command(name = "chime")]
#[command(about = "One-shot alarm tools for agent hosts")]
#[command(version)]
struct Cli {
    /// Configuration file path (default: ~/.chime/config.toml)
    #[arg(short, long, global = true, env = "CHIME_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Run a console session on stdin/stdout (default)
    Run,

    /// Print the tool definitions as JSON
    Tools,
}

/// Load the config file, falling back to defaults when it does not exist.
///
/// Returns the notes to log once tracing is up.
fn load_config(path: Option<&Path>) -> anyhow::Result<(Config, Vec<String>)> {
    let mut notes = Vec::new();
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => Config::default_path(),
    };

    let config = match path {
        Some(path) => match ConfigLoader::load(&path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(p)) => {
                notes.push(format!("Config file {} not found, using defaults", p));
                Config::default()
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to load {}", path.display()));
            }
        },
        None => {
            notes.push("No home directory, using default config".to_string());
            Config::default()
        }
    };

    let warnings = ConfigValidator::validate(&config).into_result()?;
    notes.extend(warnings.iter().map(|w| format!("Config warning: {}", w)));
    Ok((config, notes))
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();

    let file_layer = if logging.file {
        let log_dir = PathBuf::from(ConfigLoader::expand_path(&logging.directory));
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("chime")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the console protocol, so human logs go to stderr.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, notes) = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging)?;
    for note in notes {
        warn!("{}", note);
    }

    let work_dir = std::env::current_dir()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_console(config, work_dir).await,
        Commands::Tools => print_tools(config, work_dir).await,
    }
}

/// Run the console session until stdin closes or Ctrl-C.
async fn run_console(config: Config, work_dir: PathBuf) -> anyhow::Result<()> {
    info!("Starting chime v{}", env!("CARGO_PKG_VERSION"));

    let scheduler = Scheduler::new();
    let setup = register::build_sink(&config.sink)?;
    scheduler.attach_sink(setup.sink);

    let kernel = Kernel::new(work_dir);
    register::load_alarm_extension(&kernel, scheduler, &config.alarm).await?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Interrupted");
    };

    let session = console::run_session(
        kernel.tool_registry().clone(),
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        setup.events,
        shutdown,
    )
    .await;

    kernel.stop().await?;
    info!("chime stopped");
    session
}

async fn print_tools(config: Config, work_dir: PathBuf) -> anyhow::Result<()> {
    let kernel = Kernel::new(work_dir);
    register::load_alarm_extension(&kernel, Scheduler::new(), &config.alarm).await?;

    let definitions = kernel.tool_registry().list();
    println!("{}", serde_json::to_string_pretty(&definitions)?);

    kernel.stop().await?;
    Ok(())
}
