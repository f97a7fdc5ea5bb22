//! Resonance CLI - run and inspect learning event hubs.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "resonance")]
#[command(author, version, about = "Resonance - a publish/subscribe hub that learns", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Resonance project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run a small Sensor/Actuator/Logger hub and save what it learned
    Demo {
        /// Number of waves to publish (default: from resonance.toml)
        #[arg(short, long)]
        publishes: Option<u64>,

        /// Where to write the state file (default: from resonance.toml)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show hub statistics from a saved state
    Status {
        /// State file (default: from resonance.toml)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Number of strongest bonds to show
        #[arg(short, long, default_value = "5")]
        top: usize,
    },

    /// List modules bonded to a module
    Related {
        /// Module name
        module: String,

        /// State file (default: from resonance.toml)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Minimum bond weight
        #[arg(short, long, default_value = "0.3")]
        threshold: f64,
    },

    /// Render the bond graph as text
    Visualize {
        /// State file (default: from resonance.toml)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Minimum bond weight for a pair to be drawn
        #[arg(short, long, default_value = "0.2")]
        threshold: f64,
    },

    /// List the strongest directed bonds
    Bonds {
        /// State file (default: from resonance.toml)
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Number of bonds to show
        #[arg(short, long, default_value = "20")]
        top: usize,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Demo { publishes, output } => commands::demo::run(publishes, output, cli.verbose),
        Commands::Status { state, top } => commands::status::run(state, top),
        Commands::Related {
            module,
            state,
            threshold,
        } => commands::related::run(&module, state, threshold),
        Commands::Visualize { state, threshold } => commands::visualize::run(state, threshold),
        Commands::Bonds { state, top } => commands::bonds::run(state, top),
    }
}
