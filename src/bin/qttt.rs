//! qttt CLI - Tabular Q-learning for tic-tac-toe
//!
//! This CLI provides a unified interface for:
//! - Training agents by self-play or against fixed opponents
//! - Playing against an agent that keeps learning
//! - Inspecting learned action values
//! - Exporting value tables for further analysis

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qttt")]
#[command(version, about = "Q-learning agents for tic-tac-toe", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent
    Train(Box<qttt::cli::commands::train::TrainArgs>),

    /// Play against an agent in the terminal
    Play(Box<qttt::cli::commands::play::PlayArgs>),

    /// Show learned values for a position
    Inspect(qttt::cli::commands::inspect::InspectArgs),

    /// Export learned values
    Export(qttt::cli::commands::export::ExportArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Train(args) => qttt::cli::commands::train::execute(*args),
        Commands::Play(args) => qttt::cli::commands::play::execute(*args),
        Commands::Inspect(args) => qttt::cli::commands::inspect::execute(args),
        Commands::Export(args) => qttt::cli::commands::export::execute(args),
    }
}
