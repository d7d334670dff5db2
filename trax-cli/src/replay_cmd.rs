//! Replay command - apply a move log and report the verdict
//!
//! - Level 1: run() - orchestration
//! - Level 2: replay_moves()
//! - Level 3: formatting

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use trax_core::{find_wins_from, Board, Color, GameResult, Move, Win};

use crate::record::read_moves;

#[derive(Args)]
pub struct ReplayArgs {
    /// Move log to replay
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Skip printing the final board
    #[arg(long)]
    pub quiet: bool,
}

/// Outcome of a replay
#[derive(Debug)]
pub struct Replay {
    pub board: Board,
    pub result: GameResult,
    pub wins: Vec<Win>,
    /// Moves applied before the game ended
    pub applied: usize,
}

/// Run replay command
pub fn run(args: ReplayArgs) -> Result<()> {
    let moves = read_moves(&args.file)?;
    tracing::info!("Replaying {} moves from {}", moves.len(), args.file.display());

    let replay = replay_moves(&moves)?;
    if replay.applied < moves.len() {
        tracing::warn!(
            "Game ended after move {}; {} trailing move(s) ignored",
            replay.applied,
            moves.len() - replay.applied
        );
    }

    if !args.quiet {
        println!("{}", replay.board);
    }
    println!("Moves:  {}", replay.applied);
    println!("Tiles:  {}", replay.board.len());
    println!("Result: {:?}", replay.result);
    for win in &replay.wins {
        println!("  {} {:?}", win.color, win.kind);
    }
    Ok(())
}

/// Apply moves in order, white first, stopping at the first win
pub fn replay_moves(moves: &[Move]) -> Result<Replay> {
    let mut board = Board::new();

    for (i, &mv) in moves.iter().enumerate() {
        let placement = board
            .play_move(mv)
            .with_context(|| format!("move {} ({}) is not playable", i + 1, mv))?;

        let mover = if i % 2 == 0 { Color::White } else { Color::Red };
        let wins = find_wins_from(&board, placement.coords());
        let result = GameResult::from_wins(&wins, mover);
        if result.is_over() {
            return Ok(Replay {
                board,
                result,
                wins,
                applied: i + 1,
            });
        }
    }

    Ok(Replay {
        board,
        result: GameResult::Ongoing,
        wins: Vec::new(),
        applied: moves.len(),
    })
}
