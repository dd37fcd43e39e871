//! Surakarta CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the greedy AI (interactive or through a handoff file)
//! - selfplay: Let the AI play itself and report the results

mod play;
mod selfplay;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "surakarta")]
#[command(about = "Surakarta board game with a greedy AI")]
#[command(version)]
struct Cli {
    /// Random seed for the AI RNGs (random tie-breaks and the random player)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the AI
    Play(play::PlayArgs),
    /// Run AI vs AI games
    Selfplay(selfplay::SelfPlayArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the board and JSON output stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
    }
}
