//! Board state: tile storage, validated play and forced-move propagation

use crate::board::{Bounds, Coord, Direction};
use crate::error::{Result, TraxError};
use crate::notation::Move;
use crate::rules::{check_placement, constraint, Constraint};
use crate::tiles::{NeighborColors, Shape, Tile, SHAPES};
use rustc_hash::FxHashMap;
use std::fmt;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Contents of one grid cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Placed(Tile),
}

/// Everything one accepted move put on the board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Cell named by the move
    pub at: Coord,
    /// Orientation derived for it
    pub tile: Tile,
    /// Forced tiles, in placement order
    pub forced: Vec<(Coord, Tile)>,
}

impl Placement {
    /// All cells filled by this move
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        std::iter::once(self.at).chain(self.forced.iter().map(|&(c, _)| c))
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board state (clone to keep a snapshot)
#[derive(Clone, Debug, Default)]
pub struct Board {
    /// Sparse cell -> tile map
    tiles: FxHashMap<Coord, Tile>,

    /// Tight box around all tiles, `None` while empty
    bounds: Option<Bounds>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay moves from an empty board
    pub fn from_moves<I: IntoIterator<Item = Move>>(moves: I) -> Result<Self> {
        let mut board = Self::new();
        for mv in moves {
            board.play_move(mv)?;
        }
        Ok(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn get(&self, coord: Coord) -> Cell {
        match self.tiles.get(&coord) {
            Some(&tile) => Cell::Placed(tile),
            None => Cell::Empty,
        }
    }

    pub fn tile(&self, coord: Coord) -> Option<Tile> {
        self.tiles.get(&coord).copied()
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        !self.tiles.contains_key(&coord)
    }

    /// No placed orthogonal neighbor
    pub fn is_isolated(&self, coord: Coord) -> bool {
        coord.neighbors().iter().all(|&n| self.is_empty(n))
    }

    /// Number of placed tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_board_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Iterate placed tiles
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, Tile)> + '_ {
        self.tiles.iter().map(|(&c, &t)| (c, t))
    }

    /// Colors the four neighbors present toward `coord`
    pub fn neighbor_colors(&self, coord: Coord) -> NeighborColors {
        let facing = |d: Direction| {
            self.tile(coord.neighbor(d))
                .map(|t| t.edge_color(d.opposite()))
        };
        NeighborColors {
            north: facing(Direction::North),
            east: facing(Direction::East),
            south: facing(Direction::South),
            west: facing(Direction::West),
        }
    }

    // ========================================================================
    // MOVE COORDINATES
    // ========================================================================

    /// Absolute cell that relative offset (0, 0) refers to
    ///
    /// One column west and one row north of the box, or (0, 0) on an empty
    /// board.
    pub fn origin(&self) -> Coord {
        match self.bounds {
            Some(b) => Coord::new(b.west - 1, b.north - 1),
            None => Coord::ORIGIN,
        }
    }

    /// Absolute cell named by a move
    pub fn resolve(&self, mv: Move) -> Result<Coord> {
        let origin = self.origin();
        let col = i32::try_from(mv.col).map_err(|_| TraxError::OutOfRange)?;
        let x = origin.x.checked_add(col).ok_or(TraxError::OutOfRange)?;
        let y = origin.y.checked_add(mv.row).ok_or(TraxError::OutOfRange)?;
        let coord = Coord::new(x, y);
        if !coord.in_range() {
            return Err(TraxError::OutOfRange);
        }
        Ok(coord)
    }

    /// Relative move naming `coord`
    pub fn to_move(&self, coord: Coord, shape: Shape) -> Result<Move> {
        let origin = self.origin();
        let col = coord
            .x
            .checked_sub(origin.x)
            .and_then(|c| u32::try_from(c).ok())
            .ok_or(TraxError::OutOfRange)?;
        let row = coord.y.checked_sub(origin.y).ok_or(TraxError::OutOfRange)?;
        Ok(Move::new(col, row, shape))
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Check `shape` on `coord` without touching the board
    ///
    /// Returns the tile the placement would produce.
    pub fn check(&self, coord: Coord, shape: Shape) -> Result<Tile> {
        if !coord.in_range() {
            return Err(TraxError::OutOfRange);
        }
        if !self.is_empty(coord) {
            return Err(TraxError::Occupied(coord));
        }
        if !self.is_board_empty() && self.is_isolated(coord) {
            return Err(TraxError::Isolated(coord));
        }
        check_placement(shape, &self.neighbor_colors(coord)).map_err(|violation| {
            TraxError::Illegal {
                at: coord,
                shape,
                violation,
            }
        })
    }

    pub fn check_move(&self, mv: Move) -> Result<Tile> {
        self.check(self.resolve(mv)?, mv.shape)
    }

    /// Shapes that pass the legality check on an empty, non-isolated cell
    fn legal_shapes(&self, coord: Coord) -> impl Iterator<Item = Shape> {
        let colors = self.neighbor_colors(coord);
        SHAPES
            .into_iter()
            .filter(move |&s| check_placement(s, &colors).is_ok())
    }

    /// Generate all legal moves
    ///
    /// Scans the box grown by one cell on each side in row-major order,
    /// skipping placed and isolated cells.
    pub fn legal_moves(&self) -> Vec<Move> {
        let Some(bounds) = self.bounds else {
            return SHAPES.iter().map(|&s| Move::new(0, 0, s)).collect();
        };

        let cells: Vec<Coord> = bounds
            .expanded(1)
            .cells()
            .filter(|&c| self.is_empty(c) && !self.is_isolated(c))
            .collect();

        #[cfg(feature = "parallel")]
        let placements: Vec<(Coord, Shape)> = {
            use rayon::prelude::*;
            cells
                .par_iter()
                .flat_map_iter(|&c| self.legal_shapes(c).map(move |s| (c, s)))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let placements: Vec<(Coord, Shape)> = cells
            .iter()
            .flat_map(|&c| self.legal_shapes(c).map(move |s| (c, s)))
            .collect();

        placements
            .into_iter()
            .filter_map(|(c, s)| self.to_move(c, s).ok())
            .collect()
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Play `shape` on `coord` and run forced-move propagation
    ///
    /// The move and its forced tiles are committed together; on any error
    /// the board is left as it was.
    pub fn play(&mut self, coord: Coord, shape: Shape) -> Result<Placement> {
        let tile = self.check(coord, shape)?;

        let mut next = self.clone();
        next.place(coord, tile);
        let forced = next.propagate()?;

        tracing::debug!(
            "placed {:?} at {} with {} forced tile(s)",
            tile,
            coord,
            forced.len()
        );
        *self = next;

        Ok(Placement {
            at: coord,
            tile,
            forced,
        })
    }

    /// Play a relative move
    pub fn play_move(&mut self, mv: Move) -> Result<Placement> {
        let coord = self.resolve(mv)?;
        self.play(coord, mv.shape)
    }

    /// Apply a relative move to a copy of the board
    pub fn apply_move(&self, mv: Move) -> Result<Self> {
        let mut next = self.clone();
        next.play_move(mv)?;
        Ok(next)
    }

    /// Store a tile and grow the box. The only writer of `tiles` and `bounds`.
    pub(crate) fn place(&mut self, coord: Coord, tile: Tile) {
        self.tiles.insert(coord, tile);
        match &mut self.bounds {
            Some(b) => b.include(coord),
            None => self.bounds = Some(Bounds::around(coord)),
        }
    }

    // ========================================================================
    // FORCED MOVES
    // ========================================================================

    /// Fill forced cells until none are left
    ///
    /// A cell outside the box touches at most one tile and is never forced,
    /// so the box does not grow here. Every round fills one of its empty
    /// cells, which bounds the number of rounds.
    fn propagate(&mut self) -> Result<Vec<(Coord, Tile)>> {
        let mut forced = Vec::new();
        let Some(bounds) = self.bounds else {
            return Ok(forced);
        };

        let area = i64::from(bounds.width()) * i64::from(bounds.height());
        let empty_cells = usize::try_from(area).map_err(|_| TraxError::OutOfRange)? - self.len();

        for _ in 0..=empty_cells {
            match self.next_forced(bounds)? {
                Some((coord, tile)) => {
                    tracing::debug!("forced {:?} at {}", tile, coord);
                    self.place(coord, tile);
                    forced.push((coord, tile));
                }
                None => break,
            }
        }

        Ok(forced)
    }

    /// First forced cell in row-major order from the north-west corner
    fn next_forced(&self, bounds: Bounds) -> Result<Option<(Coord, Tile)>> {
        for coord in bounds.cells() {
            if !self.is_empty(coord) {
                continue;
            }
            let colors = self.neighbor_colors(coord);
            match constraint(&colors) {
                Constraint::Unconstrained => {}
                Constraint::Forbidden => return Err(TraxError::ForcedContradiction { at: coord }),
                Constraint::Forced(shape) => {
                    let tile = check_placement(shape, &colors)
                        .map_err(|_| TraxError::ForcedContradiction { at: coord })?;
                    return Ok(Some((coord, tile)));
                }
            }
        }
        Ok(None)
    }
}

/// Shape char plus east color digit per cell, framed by the box
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(b) = self.bounds else {
            return writeln!(f, "(empty board)");
        };

        let rule = "--".repeat(b.width() as usize);
        write!(f, "    ")?;
        for x in b.west..=b.east {
            write!(f, "{:2}", x.rem_euclid(10))?;
        }
        writeln!(f)?;
        writeln!(f, "    {}", rule)?;
        for y in b.north..=b.south {
            write!(f, "{:3}|", y)?;
            for x in b.west..=b.east {
                match self.tile(Coord::new(x, y)) {
                    Some(t) => write!(f, "{}{}", t.shape().to_char(), t.east_color().digit())?,
                    None => write!(f, "  ")?,
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "    {}", rule)
    }
}

// ============================================================================
// TESTS
// ============================================================================
