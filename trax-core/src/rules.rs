//! Placement legality and forced-shape constraints
//!
//! Both the legality checker and the forced-move propagator read neighbor
//! colors through the same notion of which edge pairs a shape joins
//! (`Shape::paths` / `Shape::joining`).

use crate::board::DIRECTIONS;
use crate::tiles::{orientation_for, Color, NeighborColors, Shape, Tile};
use serde::{Deserialize, Serialize};

/// Why a shape may not be placed on a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Violation {
    /// Two neighbor edges joined by one path show different colors
    #[error("neighbor colors disagree along one of the tile's paths")]
    Inconsistent,

    /// The derived tile does not match a neighbor edge
    #[error("tile colors do not connect to a neighbor")]
    Disconnected,

    /// Three neighbors already show the same color
    #[error("three neighbors show the same color")]
    Prohibited,
}

/// What the neighbors of an empty cell demand
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// No tile can ever fill this cell
    Forbidden,
    /// Exactly this shape must fill the cell
    Forced(Shape),
    /// Any consistent shape may be played here
    Unconstrained,
}

// ============================================================================
// PREDICATES
// ============================================================================

fn disagree(a: Option<Color>, b: Option<Color>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x != y)
}

/// Neither of the shape's paths joins two differently colored neighbors
pub fn is_consistent(shape: Shape, colors: &NeighborColors) -> bool {
    shape
        .paths()
        .iter()
        .all(|&(a, b)| !disagree(colors.get(a), colors.get(b)))
}

/// Every neighbor edge matches the derived tile's edge
pub fn is_connected(tile: Tile, colors: &NeighborColors) -> bool {
    DIRECTIONS
        .iter()
        .all(|&d| colors.get(d).map_or(true, |c| c == tile.edge_color(d)))
}

/// Three (or four) neighbors show the same color
pub fn is_prohibited(colors: &NeighborColors) -> bool {
    colors.count(Color::White) >= 3 || colors.count(Color::Red) >= 3
}

/// Full legality check of `shape` among `colors`
///
/// Returns the tile the shape would become.
pub fn check_placement(shape: Shape, colors: &NeighborColors) -> Result<Tile, Violation> {
    if !is_consistent(shape, colors) {
        return Err(Violation::Inconsistent);
    }
    let tile = orientation_for(shape, colors);
    if !is_connected(tile, colors) {
        return Err(Violation::Disconnected);
    }
    if is_prohibited(colors) {
        return Err(Violation::Prohibited);
    }
    Ok(tile)
}

// ============================================================================
// CONSTRAINTS
// ============================================================================

/// Classify an empty cell by its neighbor colors
///
/// Any two neighbors showing the same color must be joined by a path, which
/// names exactly one shape.
pub fn constraint(colors: &NeighborColors) -> Constraint {
    if is_prohibited(colors) {
        return Constraint::Forbidden;
    }

    let mut forced: Option<Shape> = None;
    for (i, &a) in DIRECTIONS.iter().enumerate() {
        for &b in &DIRECTIONS[i + 1..] {
            let same = matches!((colors.get(a), colors.get(b)), (Some(x), Some(y)) if x == y);
            if !same {
                continue;
            }
            let Some(shape) = Shape::joining(a, b) else {
                continue;
            };
            match forced {
                Some(existing) if existing != shape => return Constraint::Forbidden,
                _ => forced = Some(shape),
            }
        }
    }

    match forced {
        Some(shape) if is_consistent(shape, colors) => Constraint::Forced(shape),
        Some(_) => Constraint::Forbidden,
        None => Constraint::Unconstrained,
    }
}
