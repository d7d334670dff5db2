//! Move selection and the turn-taking solver

use crate::board::Coord;
use crate::config::{SolverConfig, Strategy};
use crate::error::{Result, TraxError};
use crate::game::{Board, Placement};
use crate::notation::Move;
use crate::patterns::scan;
use crate::tiles::{Color, Shape};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// SELECTION
// ============================================================================

/// Why a move was picked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// Closes one of the mover's small loops
    Win,
    /// Turns a gap corner away from an opponent loop
    Block,
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub mv: Move,
    pub reason: Reason,
}

/// Create a seeded or entropy-backed RNG
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Recommended placement as a move, if it is still legal
fn recheck(board: &Board, (at, shape): (Coord, Shape)) -> Option<Move> {
    match board.check(at, shape) {
        Ok(_) => board.to_move(at, shape).ok(),
        Err(e) => {
            tracing::warn!("skipping stale recommendation {} at {}: {}", shape, at, e);
            None
        }
    }
}

/// Choose a move for `color` without playing it
///
/// Priority: close an own small loop, block an opponent's, then pick a
/// uniformly random legal move.
pub fn select_move<R: Rng>(
    board: &Board,
    color: Color,
    strategy: Strategy,
    rng: &mut R,
) -> Result<Selection> {
    if strategy == Strategy::Patterns {
        let patterns = scan(board);

        for p in patterns.iter().filter(|p| p.color == color) {
            if let Some(mv) = recheck(board, p.closing) {
                return Ok(Selection { mv, reason: Reason::Win });
            }
        }

        for p in patterns.iter().filter(|p| p.color != color) {
            if let Some(mv) = p.blocking.iter().find_map(|&b| recheck(board, b)) {
                return Ok(Selection { mv, reason: Reason::Block });
            }
        }
    }

    let candidates = board.legal_moves();
    let mv = candidates.choose(rng).copied().ok_or(TraxError::NoLegalMove)?;
    Ok(Selection { mv, reason: Reason::Random })
}

// ============================================================================
// SOLVER
// ============================================================================

/// One side of a game: owns its board copy, color and RNG
pub struct Solver {
    pub color: Color,
    pub config: SolverConfig,
    board: Board,
    rng: ChaCha8Rng,
}

impl Solver {
    pub fn new(color: Color, config: SolverConfig) -> Self {
        Self {
            color,
            rng: create_rng(config.seed),
            config,
            board: Board::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Play one turn
    ///
    /// Applies the opponent's move (if any), then picks and applies this
    /// solver's own move. On an empty board the configured opening is
    /// played without thinking.
    pub fn take_turn(&mut self, turn: u32, opponent: Option<Move>) -> Result<Move> {
        if let Some(mv) = opponent {
            self.board.play_move(mv)?;
        }

        if self.board.is_board_empty() {
            let mv = self.config.opening;
            self.board.play_move(mv)?;
            tracing::info!("turn {}: {} opens with {}", turn, self.color, mv);
            return Ok(mv);
        }

        let (selection, placement) = self.choose_and_play()?;
        tracing::info!(
            "turn {}: {} plays {} ({:?}, {} forced)",
            turn,
            self.color,
            selection.mv,
            selection.reason,
            placement.forced.len()
        );
        Ok(selection.mv)
    }

    /// Select and apply a move, falling back to other random candidates
    /// when propagation rejects the selection
    fn choose_and_play(&mut self) -> Result<(Selection, Placement)> {
        let selection = select_move(&self.board, self.color, self.config.strategy, &mut self.rng)?;
        match self.board.play_move(selection.mv) {
            Ok(placement) => return Ok((selection, placement)),
            Err(e @ TraxError::ForcedContradiction { .. }) => {
                tracing::warn!("selected move {} rejected: {}", selection.mv, e);
            }
            Err(e) => return Err(e),
        }

        let mut candidates = self.board.legal_moves();
        candidates.retain(|&m| m != selection.mv);
        candidates.shuffle(&mut self.rng);

        for mv in candidates {
            match self.board.play_move(mv) {
                Ok(placement) => {
                    return Ok((Selection { mv, reason: Reason::Random }, placement));
                }
                Err(TraxError::ForcedContradiction { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(TraxError::NoLegalMove)
    }
}
