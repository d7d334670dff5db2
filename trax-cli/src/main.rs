//! TRAX CLI - Command-line interface
//!
//! Commands:
//! - play: Self-play between two solvers, logging moves
//! - replay: Apply a move log and report the verdict
//! - stdio: Play against an external opponent over stdin/stdout

mod play_cmd;
mod record;
mod replay_cmd;
mod stdio_cmd;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trax_core::SolverConfig;

#[derive(Parser)]
#[command(name = "trax")]
#[command(about = "Trax rule engine and self-play driver")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Solver config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between a white and a red solver
    Play(play_cmd::PlayArgs),
    /// Replay a move log
    Replay(replay_cmd::ReplayArgs),
    /// Answer moves read from stdin
    Stdio(stdio_cmd::StdioArgs),
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the move protocol
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, load_config(cli.config.as_deref(), cli.seed)?),
        Commands::Replay(args) => replay_cmd::run(args),
        Commands::Stdio(args) => stdio_cmd::run(args, load_config(cli.config.as_deref(), cli.seed)?),
    }
}

/// Config file (or defaults) with the command-line seed applied on top
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<SolverConfig> {
    let config = match path {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::default(),
    };
    Ok(match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    })
}
