//! Loadtime CLI - prints the process load time
//!
//! Composition root: wires the clock and RNG adapters into a single
//! `TimeSource` and shares it with every consumer.

mod logging;
mod output;
mod verify;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loadtime_core::port::random_provider::{OsRandomProvider, SeededRandomProvider};
use loadtime_core::port::time_provider::SystemTimeProvider;
use loadtime_core::port::RandomProvider;
use loadtime_core::{TimeSource, VERSION};
use output::OutputFormat;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "loadtime")]
#[command(about = "Print a randomized, per-process load time", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format
    #[arg(long, value_enum, env = "LOADTIME_FORMAT", default_value = "plain")]
    format: OutputFormat,

    /// Seed the random offset for reproducible output
    #[arg(long, env = "LOADTIME_SEED")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the load time (default)
    Show,

    /// Read the load time concurrently and check every read agrees
    Verify {
        /// Total number of reads
        #[arg(short = 'n', long, default_value = "1000")]
        reads: usize,

        /// Number of reader threads
        #[arg(short, long, default_value = "8")]
        threads: usize,
    },
}

fn main() -> Result<()> {
    logging::init_logging()?;

    let cli = Cli::parse();
    info!(version = VERSION, "loadtime starting");

    // DI wiring
    let random_provider: Arc<dyn RandomProvider> = match cli.seed {
        Some(seed) => {
            info!(seed = seed, "Using seeded random offset");
            Arc::new(SeededRandomProvider::new(seed))
        }
        None => Arc::new(OsRandomProvider),
    };
    let time_source = Arc::new(TimeSource::new(
        Arc::new(SystemTimeProvider),
        random_provider,
    ));

    let load_time = match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => time_source
            .get_load_time()
            .context("Failed to compute load time")?,
        Commands::Verify { reads, threads } => {
            verify::verify(&time_source, reads, threads)?.load_time
        }
    };

    println!("{}", output::render(load_time, cli.format)?);
    Ok(())
}
