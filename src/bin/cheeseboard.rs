//! Cheeseboard CLI - a mouse learns to find cheese on a trapped 5x5 board
//!
//! This CLI provides a unified interface for:
//! - Loading the cached brain (or training one) and watching the mouse
//! - Training a fresh brain with custom hyperparameters
//! - Replaying a cached brain without training
//! - Printing the greedy policy for a fixed cheese position

use anyhow::Result;
use clap::{Parser, Subcommand};
use cheeseboard::cli::commands::{policy, replay, run, train};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "cheeseboard")]
#[command(version, about = "Tabular Q-learning mouse on a trapped grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the cached brain (or train one), then watch the mouse
    Run(Box<run::RunArgs>),

    /// Train a fresh brain and save it
    Train(Box<train::TrainArgs>),

    /// Replay a cached brain without training
    Replay(replay::ReplayArgs),

    /// Print the greedy policy for one cheese position
    Policy(policy::PolicyArgs),
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cheeseboard=info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args),
        Some(Commands::Train(args)) => train::execute(*args),
        Some(Commands::Replay(args)) => replay::execute(args),
        Some(Commands::Policy(args)) => policy::execute(args),
        None => run::execute(run::RunArgs::parse_from(["cheeseboard"])),
    }
}
