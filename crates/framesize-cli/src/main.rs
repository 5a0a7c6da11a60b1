use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use framesize_config::ConfigLoader;
use framesize_core::StandardSizers;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Frame buffer sizing for the stack machine.
///
/// Classifies programs into allocation tiers and shows how each tier's frame
/// buffer is laid out.
///
/// EXAMPLES:
///     framesize tiers                 Show every tier and its buffer size
///     framesize classify 10000        Tier for a 10000-byte program
///     framesize classify -f code.bin  Tier for a program file
///     framesize layout medium         Region layout of the medium tier
///
/// ENVIRONMENT VARIABLES:
///     FRAMESIZE_JSON             Set to '1' for JSON output by default
///     FRAMESIZE_STACK_CAPACITY   Override stack depth in slots
///     FRAMESIZE_STACK_SLOT_SIZE  Override stack slot width in bytes
///     RUST_LOG                   Log filter (default: warn)
#[derive(Parser)]
#[command(name = "framesize")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to framesize.toml (default: search from the current directory)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every tier with its capacity and buffer size
    ///
    /// EXAMPLES:
    ///     framesize tiers
    ///     framesize tiers --json
    #[command(visible_alias = "t")]
    Tiers {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select the allocation tier for a program
    ///
    /// EXAMPLES:
    ///     framesize classify 4097
    ///     framesize classify --file contract.bin --json
    #[command(visible_alias = "c")]
    Classify {
        /// Program size in bytes
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        size: Option<usize>,
        /// Use the byte length of this file as the program size
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show region offsets inside a tier's frame buffer
    ///
    /// EXAMPLES:
    ///     framesize layout tiny
    ///     framesize layout 20000 --json
    #[command(visible_alias = "l")]
    Layout {
        /// Tier name or a program size to classify
        target: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_sizers(config_path: Option<&PathBuf>) -> Result<StandardSizers> {
    let loader = ConfigLoader::new();
    let config = match config_path {
        Some(path) => loader.load_from_file(path)?,
        None => loader
            .load_from_directory(&std::env::current_dir()?)
            .context("Failed to load framesize.toml")?,
    };
    if let Some(path) = config.config_path() {
        tracing::debug!(path = %path.display(), "using frame configuration");
    }
    Ok(config.sizers()?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let cli_config = config::Config::from_env();
    let sizers = load_sizers(cli.config.as_ref())?;

    match cli.command {
        Commands::Tiers { json } => {
            commands::tiers::run(&sizers, json || cli_config.default_json)?;
        }
        Commands::Classify { size, file, json } => {
            let program_size = match (size, file) {
                (Some(size), _) => size,
                (None, Some(path)) => commands::classify::program_size_of(&path)?,
                (None, None) => anyhow::bail!("Either a size or --file is required"),
            };
            commands::classify::run(program_size, &sizers, json || cli_config.default_json)?;
        }
        Commands::Layout { target, json } => {
            commands::layout::run(&target, &sizers, json || cli_config.default_json)?;
        }
    }

    Ok(())
}
