//! Square grid geometry with signed coordinates
//!
//! `x` grows eastward and `y` grows southward, so the north neighbor of a
//! cell has the smaller `y`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute cell coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

/// Distance tiles keep from the `i32` limits
///
/// Neighborhood scans reach a few cells past a tile, and that arithmetic
/// must not overflow.
pub const COORD_MARGIN: i32 = 4;

impl Coord {
    pub const ORIGIN: Coord = Coord::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when a tile may be stored here
    pub fn in_range(&self) -> bool {
        let range = (i32::MIN + COORD_MARGIN)..=(i32::MAX - COORD_MARGIN);
        range.contains(&self.x) && range.contains(&self.y)
    }

    /// Get neighbor in direction
    pub fn neighbor(&self, direction: Direction) -> Coord {
        let (dx, dy) = direction.vector();
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Offset by `n` steps in direction
    pub fn offset(&self, direction: Direction, n: i32) -> Coord {
        let (dx, dy) = direction.vector();
        Coord::new(self.x + dx * n, self.y + dy * n)
    }

    /// The four orthogonal neighbors in N, E, S, W order
    pub fn neighbors(&self) -> [Coord; 4] {
        DIRECTIONS.map(|d| self.neighbor(d))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass direction, also used to name tile edges
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// All directions, clockwise from north
pub const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Unit vector (dx, dy)
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Inclusive bounding box of placed cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: i32,
    pub east: i32,
    pub south: i32,
    pub west: i32,
}

impl Bounds {
    /// Box holding a single cell
    pub fn around(coord: Coord) -> Self {
        Self {
            north: coord.y,
            east: coord.x,
            south: coord.y,
            west: coord.x,
        }
    }

    /// Grow to include `coord`. Never shrinks.
    pub fn include(&mut self, coord: Coord) {
        self.north = self.north.min(coord.y);
        self.south = self.south.max(coord.y);
        self.west = self.west.min(coord.x);
        self.east = self.east.max(coord.x);
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.west && coord.x <= self.east && coord.y >= self.north && coord.y <= self.south
    }

    /// Number of columns spanned
    pub fn width(&self) -> i32 {
        self.east - self.west + 1
    }

    /// Number of rows spanned
    pub fn height(&self) -> i32 {
        self.south - self.north + 1
    }

    /// Same box grown by `margin` cells on every side
    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            north: self.north - margin,
            east: self.east + margin,
            south: self.south + margin,
            west: self.west - margin,
        }
    }

    /// Cells in row-major order starting at the north-west corner
    pub fn cells(&self) -> impl Iterator<Item = Coord> {
        let (west, east) = (self.west, self.east);
        (self.north..=self.south).flat_map(move |y| (west..=east).map(move |x| Coord::new(x, y)))
    }
}
