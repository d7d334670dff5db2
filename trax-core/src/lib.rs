//! TRAX Core - Rule engine and move selection
//!
//! This crate provides the core game logic for Trax:
//! - Board geometry (square grid with signed coordinates)
//! - Tiles, color derivation and placement legality
//! - Board state with forced-move propagation
//! - Small-loop pattern detection and path-tracing win detection
//! - Pattern-driven move selection and the turn-taking solver

pub mod board;
pub mod tiles;
pub mod rules;
pub mod notation;
pub mod error;
pub mod game;
pub mod patterns;
pub mod trace;
pub mod config;
pub mod ai;

// Re-exports for convenient access
pub use board::{Bounds, Coord, Direction, COORD_MARGIN, DIRECTIONS};
pub use tiles::{derive_color, Color, NeighborColors, Shape, Tile, SHAPES, TILES};
pub use rules::{check_placement, constraint, Constraint, Violation};
pub use notation::{column_name, Move, ParseMoveError};
pub use error::{Result, TraxError};
pub use game::{Board, Cell, Placement};
pub use patterns::{detect, scan, LoopPattern, PatternReport};
pub use trace::{find_wins, find_wins_from, trace_lines, trace_loop, GameResult, Win, WinKind, LINE_LENGTH};
pub use config::{SolverConfig, Strategy};
pub use ai::{create_rng, select_move, Reason, Selection, Solver};
