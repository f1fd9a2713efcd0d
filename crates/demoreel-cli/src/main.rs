//! demoreel - switch between demos from one selection prompt.
//!
//! Loads a registry of demos from `Demos.toml` catalogs, starts the default
//! one, and lets the user switch between them. Exactly one demo runs at a
//! time.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use demoreel_config::{ConfigResult, ResolvedConfig};
use demoreel_telemetry::{LogConfig, setup_logging};
use tracing::error;

mod catalog;
mod commands;
pub mod config_bridge;
mod formatter;
mod theme;

use commands::{config, list, run};
use formatter::OutputFormat;

/// demoreel - demo gallery
#[derive(Parser)]
#[command(name = "demoreel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the demos in selection order
    List {
        /// Catalog manifest, or directory holding `Demos.toml`
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },

    /// Start the gallery and switch demos interactively (default)
    Run {
        /// Catalog manifest, or directory holding `Demos.toml`
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Demo to start instead of the configured one
        #[arg(short, long)]
        demo: Option<String>,
    },

    /// Show the resolved configuration and where it came from
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let workspace_root = std::env::current_dir().ok();
    let resolved = demoreel_config::Config::load(workspace_root.as_deref());

    // Logging comes up even when the config is broken so the failure is
    // reported through it.
    let mut log_config = match &resolved {
        Ok(r) => config_bridge::to_log_config(&r.config),
        Err(_) => LogConfig::default(),
    };
    if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Err(e) = setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match dispatch(cli, workspace_root.as_deref(), resolved).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "demoreel failed");
            ExitCode::FAILURE
        },
    }
}

async fn dispatch(
    cli: Cli,
    workspace_root: Option<&Path>,
    resolved: ConfigResult<ResolvedConfig>,
) -> Result<()> {
    let resolved = resolved.context("failed to load configuration")?;
    let cfg = &resolved.config;

    match cli.command {
        Some(Commands::List { catalog }) => {
            list::list_demos(cfg, workspace_root, catalog.as_deref(), cli.format).await
        },
        Some(Commands::Run { catalog, demo }) => {
            run::run_gallery(cfg, workspace_root, catalog.as_deref(), demo.as_deref()).await
        },
        Some(Commands::Config) => config::show_config(&resolved, cli.format),
        None => run::run_gallery(cfg, workspace_root, None, None).await,
    }
}
