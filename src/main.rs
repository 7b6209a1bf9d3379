// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "photo-capture")]
#[command(about = "Capture, review and save photos from the terminal")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Image file to use as the camera (default: built-in test pattern)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Directory to save photos to (default: ~/Pictures/photo-capture)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Config file (default: ~/.config/photo-capture/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive capture session (default)
    Session,

    /// Take one photo and save it straight to the gallery
    Snap {
        /// Fire the flash
        #[arg(long)]
        flash: bool,

        /// Use the front lens
        #[arg(long)]
        front: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photo_capture=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let options = cli::Options {
        source: cli.source,
        output: cli.output,
        config: cli.config,
    };

    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => runtime.block_on(cli::run_session(options)),
        Commands::Snap { flash, front } => runtime.block_on(cli::take_photo(options, flash, front)),
    }
}
