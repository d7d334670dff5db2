//! Stdio command - line protocol against an external opponent
//!
//! Each input line is one opponent move; each reply is printed on its own
//! line and flushed. Playing white, the opening is printed before any input
//! is read. The session ends at end of input, on `quit`, or when either
//! side completes a win.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use trax_core::{find_wins, Color, GameResult, Move, Solver, SolverConfig};

use crate::record::MoveLog;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Side {
    White,
    Red,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Red => Color::Red,
        }
    }
}

#[derive(Args)]
pub struct StdioArgs {
    /// Color this engine plays
    #[arg(long, value_enum, default_value = "white")]
    pub color: Side,

    /// Also log every move of the session to FILE
    #[arg(long, value_name = "FILE")]
    pub record: Option<std::path::PathBuf>,
}

/// Run stdio command
pub fn run(args: StdioArgs, config: SolverConfig) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut log = match &args.record {
        Some(path) => Some(MoveLog::create(path)?),
        None => None,
    };

    let result = serve(
        Solver::new(args.color.into(), config),
        stdin.lock(),
        stdout.lock(),
        log.as_mut(),
    )?;
    tracing::info!("Session over: {:?}", result);
    Ok(())
}

/// Drive one session over any reader and writer
pub fn serve<R: BufRead, W: Write>(
    mut solver: Solver,
    input: R,
    mut output: W,
    mut log: Option<&mut MoveLog>,
) -> Result<GameResult> {
    let opponent = solver.color.opposite();
    let mut turn = 0;

    if solver.color == Color::White {
        let mv = solver.take_turn(turn, None)?;
        reply(&mut output, log.as_deref_mut(), None, mv)?;
        turn += 1;
    }

    for line in input.lines() {
        let line = line.context("Failed to read opponent move")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "quit" {
            break;
        }

        let theirs: Move = text
            .parse()
            .with_context(|| format!("Bad opponent move {:?}", text))?;

        // Their move alone may already decide the game
        let mut probe = solver.board().clone();
        probe
            .play_move(theirs)
            .with_context(|| format!("Opponent move {} is not playable", theirs))?;
        let result = GameResult::from_wins(&find_wins(&probe), opponent);
        if result.is_over() {
            if let Some(log) = log.as_deref_mut() {
                log.append(theirs)?;
            }
            return Ok(result);
        }

        let mine = solver.take_turn(turn, Some(theirs))?;
        reply(&mut output, log.as_deref_mut(), Some(theirs), mine)?;
        turn += 1;

        let result = GameResult::from_wins(&find_wins(solver.board()), solver.color);
        if result.is_over() {
            return Ok(result);
        }
    }

    Ok(GameResult::Ongoing)
}

fn reply<W: Write>(output: &mut W, log: Option<&mut MoveLog>, theirs: Option<Move>, mine: Move) -> Result<()> {
    if let Some(log) = log {
        if let Some(mv) = theirs {
            log.append(mv)?;
        }
        log.append(mine)?;
    }
    writeln!(output, "{}", mine)?;
    output.flush()?;
    Ok(())
}
