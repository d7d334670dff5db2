//! Small-loop pattern detector
//!
//! Recognizes the two smallest loop-closing configurations around an empty
//! cell: a row (or column) of two or three tiles whose paths of one color
//! bend toward a gap of empty cells next to them. Filling the gap the right
//! way closes a 2x2 or 2x3 loop.
//!
//! The detector is advisory. It feeds move selection; wins are only ever
//! declared by the trace detector.

use crate::board::{Coord, Direction};
use crate::game::Board;
use crate::tiles::{Color, Shape};
use serde::{Deserialize, Serialize};

// ============================================================================
// PATTERN TABLE
// ============================================================================

/// Geometry of one pattern side
///
/// `facing` is the edge of the existing tiles that looks at the gap and
/// `along` the direction in which the gap cells continue from the
/// candidate cell.
struct Side {
    facing: Direction,
    along: Direction,
}

/// Gap to the south, west, north and east of the existing tiles
const SIDES: [Side; 4] = [
    Side { facing: Direction::South, along: Direction::East },
    Side { facing: Direction::North, along: Direction::East },
    Side { facing: Direction::East, along: Direction::South },
    Side { facing: Direction::West, along: Direction::South },
];

/// Tile counts of the two recognized patterns
pub const PATTERN_SIZES: [i32; 2] = [2, 3];

// ============================================================================
// TYPES
// ============================================================================

/// A matched small-loop pattern
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopPattern {
    /// Color of the loop the pattern would close
    pub color: Color,
    /// Side of the existing tiles the gap lies on
    pub side: Direction,
    /// Number of existing tiles (2 or 3)
    pub size: i32,
    /// Placement that closes the loop
    pub closing: (Coord, Shape),
    /// Gap corners turned away from the loop
    pub blocking: [(Coord, Shape); 2],
}

/// All patterns starting at one candidate cell
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternReport {
    pub patterns: Vec<LoopPattern>,
}

impl PatternReport {
    /// Patterns that would close a loop of `color`
    pub fn for_color(&self, color: Color) -> impl Iterator<Item = &LoopPattern> {
        self.patterns.iter().filter(move |p| p.color == color)
    }

    pub fn has(&self, color: Color) -> bool {
        self.for_color(color).next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

// ============================================================================
// DETECTION
// ============================================================================

/// Find patterns whose first gap cell is `coord`
pub fn detect(board: &Board, coord: Coord) -> PatternReport {
    let mut report = PatternReport::default();
    if !board.is_empty(coord) {
        return report;
    }
    for side in &SIDES {
        for size in PATTERN_SIZES {
            if let Some(p) = match_side(board, coord, side, size) {
                report.patterns.push(p);
            }
        }
    }
    report
}

/// Every pattern on the board, candidate cells in row-major order
pub fn scan(board: &Board) -> Vec<LoopPattern> {
    let Some(bounds) = board.bounds() else {
        return Vec::new();
    };
    bounds
        .expanded(1)
        .cells()
        .flat_map(|c| detect(board, c).patterns)
        .collect()
}

fn match_side(board: &Board, start: Coord, side: &Side, size: i32) -> Option<LoopPattern> {
    let toward = side.facing.opposite();
    let gap = |i: i32| start.offset(side.along, i);
    let line = |i: i32| gap(i).neighbor(toward);

    if !(0..size).all(|i| board.is_empty(gap(i))) {
        return None;
    }

    // Corners bend the loop color into the gap
    let first = board.tile(line(0))?;
    let last = board.tile(line(size - 1))?;
    if Some(first.shape()) != Shape::joining(side.facing, side.along)
        || Some(last.shape()) != Shape::joining(side.facing, side.along.opposite())
    {
        return None;
    }
    let color = first.edge_color(side.facing);
    if last.edge_color(side.facing) != color {
        return None;
    }

    // A middle straight carries the loop color across
    if size == 3 {
        let middle = board.tile(line(1))?;
        if middle.shape() != Shape::Straight || middle.edge_color(side.facing) != color.opposite() {
            return None;
        }
    }

    let closing = if size == 2 {
        Shape::joining(toward, side.along).map(|s| (gap(0), s))?
    } else {
        (gap(1), Shape::Straight)
    };
    let blocking = [
        (gap(0), Shape::joining(toward, side.along.opposite())?),
        (gap(size - 1), Shape::joining(toward, side.along)?),
    ];

    Some(LoopPattern {
        color,
        side: side.facing,
        size,
        closing,
        blocking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::trace_loop;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn board(moves: &[(i32, i32, Shape)]) -> Board {
        let mut b = Board::new();
        for &(x, y, s) in moves {
            b.play(Coord::new(x, y), s).unwrap();
        }
        b
    }

    #[test]
    fn test_two_tile_gap_to_the_north() {
        // Both tiles show red on their north edges
        let b = board(&[(0, 0, Shape::NorthWest), (-1, 0, Shape::NorthEast)]);
        let report = detect(&b, Coord::new(-1, -1));

        assert!(report.has(Color::Red));
        assert!(!report.has(Color::White));
        let p = report.for_color(Color::Red).next().unwrap();
        assert_eq!(p.side, Direction::North);
        assert_eq!(p.size, 2);
        assert_eq!(p.closing, (Coord::new(-1, -1), Shape::NorthWest));
        assert_eq!(
            p.blocking,
            [
                (Coord::new(-1, -1), Shape::NorthEast),
                (Coord::new(0, -1), Shape::NorthWest),
            ]
        );
    }

    #[test]
    fn test_two_tile_gap_to_the_south() {
        let b = board(&[(0, 0, Shape::NorthWest), (1, 0, Shape::NorthEast)]);
        let report = detect(&b, Coord::new(0, 1));

        let p = report.for_color(Color::White).next().unwrap();
        assert_eq!(p.side, Direction::South);
        assert_eq!(p.closing, (Coord::new(0, 1), Shape::NorthEast));
        assert_eq!(
            p.blocking,
            [
                (Coord::new(0, 1), Shape::NorthWest),
                (Coord::new(1, 1), Shape::NorthEast),
            ]
        );

        // Only the first gap cell reports the pattern
        assert!(detect(&b, Coord::new(1, 1)).is_empty());
    }

    #[test]
    fn test_three_tile_gap() {
        let b = board(&[
            (0, 0, Shape::NorthWest),
            (1, 0, Shape::Straight),
            (2, 0, Shape::NorthEast),
        ]);
        let report = detect(&b, Coord::new(0, 1));

        let p = report.patterns.iter().find(|p| p.size == 3).unwrap();
        assert_eq!(p.color, Color::White);
        assert_eq!(p.closing, (Coord::new(1, 1), Shape::Straight));
        assert_eq!(p.blocking[1], (Coord::new(2, 1), Shape::NorthEast));
    }

    #[test]
    fn test_occupied_cell_has_no_patterns() {
        let b = board(&[(0, 0, Shape::NorthWest), (1, 0, Shape::NorthEast)]);
        assert!(detect(&b, Coord::new(0, 0)).is_empty());
        assert!(scan(&Board::new()).is_empty());
        assert_eq!(scan(&b).len(), 1);
    }

    #[test]
    fn test_closing_move_forms_traced_loop() {
        let b = board(&[(0, 0, Shape::NorthWest), (1, 0, Shape::NorthEast)]);
        let p = scan(&b)[0];

        let mut after = b.clone();
        after.play(p.closing.0, p.closing.1).unwrap();
        assert_eq!(after.len(), 4);
        assert!(trace_loop(&after, p.closing.0).contains(&p.color));
    }

    #[test]
    fn test_closing_moves_agree_with_trace_on_random_boards() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut checked = 0;

        for _ in 0..40 {
            let mut b = Board::new();
            for _ in 0..12 {
                for p in scan(&b) {
                    let (at, shape) = p.closing;
                    let mut after = b.clone();
                    if after.play(at, shape).is_ok() {
                        assert!(
                            trace_loop(&after, at).contains(&p.color),
                            "pattern {:?} did not close a loop on\n{}",
                            p,
                            b
                        );
                        checked += 1;
                    }
                }

                let moves = b.legal_moves();
                let Some(&mv) = moves.choose(&mut rng) else { break };
                // Moves that hit a forced contradiction are simply skipped
                let _ = b.play_move(mv);
            }
        }
        assert!(checked > 0);
    }
}
