use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slotreel_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "slotreel")]
#[command(author, version, about = "A three-reel slot machine for the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal
    Run,
    /// Spin headlessly on a simulated clock
    Simulate {
        /// Number of spins
        #[arg(short = 'n', long, default_value_t = 10)]
        spins: u32,
        /// RNG seed, overrides the configured one
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Print the draw commands of the final frame
        #[arg(long)]
        trace: bool,
    },
    /// Print the payout table
    Paytable,
    /// Show the config path, writing defaults if missing
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_from(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    // The terminal UI owns the screen, so it logs to a file
    let interactive = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, interactive)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config),
        Some(Commands::Simulate {
            spins,
            seed,
            json,
            trace,
        }) => commands::simulate::run(config, spins, seed, json, trace),
        Some(Commands::Paytable) => commands::paytable::run(&config),
        Some(Commands::Config) => commands::config::run(&config, &config_path),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let writer = if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        BoxMakeWriter::new(Arc::new(file))
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(!to_file)
                .with_writer(writer),
        )
        .init();

    Ok(())
}
