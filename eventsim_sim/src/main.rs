//! eventsim CLI
//!
//! Runs the simulation described by a configuration file and prints one
//! result line per event.

use clap::Parser;
use eventsim_sim::{load_config, RunExport, SimulationRunner};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Deterministic parallel event simulation
#[derive(Parser, Debug)]
#[command(name = "eventsim")]
#[command(about = "Run a deterministic event simulation", long_about = None)]
struct Args {
    /// Path to the configuration file
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Worker threads (overrides number_of_threads; 0 = main thread only)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Initial seed (overrides initial_seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export per-event results to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    // Initialize logging; one writer lock shared by every worker thread
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(std::io::stderr()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("eventsim v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            error!("Incorrect configuration file: {}", args.config.display());
            std::process::exit(1);
        }
    };

    let runner = SimulationRunner::new(config)
        .with_workers(args.threads)
        .with_seed(args.seed);

    let summary = match runner.execute() {
        Ok(summary) => summary,
        Err(e) => {
            error!("Simulation aborted: {}", e);
            std::process::exit(1);
        }
    };

    let export = RunExport::from_summary(&summary);

    if args.json {
        match export.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize results: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        for line in summary.outputs() {
            println!("{}", line);
        }
    }

    if let Some(path) = &args.export {
        if let Err(e) = export.write_to_file(path) {
            error!("Failed to write export: {:?}", e);
            std::process::exit(1);
        }
        info!("Exported {} events to {}", export.events.len(), path.display());
    }

    if !summary.passed() {
        warn!(
            "{}/{} events failed (seed={})",
            summary.metrics.failed, summary.metrics.events, summary.seed
        );
    }

    if args.verbose {
        info!(
            "{} workers, {:.0} events/s, seed={}",
            summary.workers,
            summary.metrics.events_per_sec(),
            summary.seed
        );
    }
}
