//! Win detection by path tracing
//!
//! A ray walks along one colored path: each tile it enters sends it out
//! through the edge its shape joins to the entry edge. A ray that comes back
//! to its start has gone round a loop. A ray that crosses the whole box
//! from its west column to past its east column (or north to south) has
//! followed a line.
//!
//! Every walk is bounded by the tile count, since a path visits each tile
//! at most once.

use crate::board::{Coord, Direction, DIRECTIONS};
use crate::game::Board;
use crate::tiles::Color;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum box span for a line win
pub const LINE_LENGTH: i32 = 8;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    Loop,
    Line,
}

/// A completed winning structure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    pub color: Color,
    pub kind: WinKind,
}

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    RedWins,
}

impl GameResult {
    /// Verdict after `mover` made the move that produced `wins`
    ///
    /// A move that completes structures of both colors wins for the mover.
    pub fn from_wins(wins: &[Win], mover: Color) -> Self {
        let white = wins.iter().any(|w| w.color == Color::White);
        let red = wins.iter().any(|w| w.color == Color::Red);
        match (white, red) {
            (false, false) => GameResult::Ongoing,
            (true, false) => GameResult::WhiteWins,
            (false, true) => GameResult::RedWins,
            (true, true) => GameResult::won_by(mover),
        }
    }

    pub fn won_by(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Red => GameResult::RedWins,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameResult::Ongoing
    }
}

// ============================================================================
// TRACING
// ============================================================================

/// Walk a ray that enters `start` heading `heading`
///
/// Returns the first empty cell reached, or `None` when the ray gets back
/// to `stop` first.
fn walk(board: &Board, start: Coord, mut heading: Direction, stop: Option<Coord>) -> Option<Coord> {
    let mut pos = start;
    for _ in 0..=board.len() {
        if Some(pos) == stop {
            return None;
        }
        let Some(tile) = board.tile(pos) else {
            return Some(pos);
        };
        heading = tile.shape().exit(heading.opposite());
        pos = pos.neighbor(heading);
    }
    Some(pos)
}

/// Colors of the loops passing through `start`
pub fn trace_loop(board: &Board, start: Coord) -> Vec<Color> {
    let mut colors = Vec::new();
    let Some(tile) = board.tile(start) else {
        return colors;
    };
    for d in DIRECTIONS {
        if walk(board, start.neighbor(d), d, Some(start)).is_none() {
            let color = tile.edge_color(d);
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
    }
    colors
}

/// Lines crossing the whole box
///
/// Every occupied cell of the west column and the north row is tried.
pub fn trace_lines(board: &Board) -> Vec<Win> {
    let mut wins = Vec::new();
    let Some(b) = board.bounds() else {
        return wins;
    };
    let mut add = |color: Color| {
        let win = Win { color, kind: WinKind::Line };
        if !wins.contains(&win) {
            wins.push(win);
        }
    };

    if b.width() >= LINE_LENGTH {
        for y in b.north..=b.south {
            let start = Coord::new(b.west, y);
            let Some(tile) = board.tile(start) else { continue };
            if walk(board, start, Direction::East, None).is_some_and(|end| end.x == b.east + 1) {
                add(tile.edge_color(Direction::West));
            }
        }
    }

    if b.height() >= LINE_LENGTH {
        for x in b.west..=b.east {
            let start = Coord::new(x, b.north);
            let Some(tile) = board.tile(start) else { continue };
            if walk(board, start, Direction::South, None).is_some_and(|end| end.y == b.south + 1) {
                add(tile.edge_color(Direction::North));
            }
        }
    }

    wins
}

/// Wins involving any of `coords` plus any line on the board
///
/// Pass the cells filled by the last move to check just that move.
pub fn find_wins_from<I: IntoIterator<Item = Coord>>(board: &Board, coords: I) -> Vec<Win> {
    let mut wins = trace_lines(board);
    for coord in coords {
        for color in trace_loop(board, coord) {
            let win = Win { color, kind: WinKind::Loop };
            if !wins.contains(&win) {
                wins.push(win);
            }
        }
    }
    wins
}

/// Every win on the board
pub fn find_wins(board: &Board) -> Vec<Win> {
    let coords: Vec<Coord> = board.tiles().map(|(c, _)| c).collect();
    find_wins_from(board, coords)
}
