//! Tile shapes, orientations and color derivation

use crate::board::{Direction, DIRECTIONS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Red,
            Color::Red => Color::White,
        }
    }

    /// Single digit used by the board printer (1 = white, 2 = red)
    pub fn digit(self) -> char {
        match self {
            Color::White => '1',
            Color::Red => '2',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Red => write!(f, "red"),
        }
    }
}

/// Undirected tile shape, the only thing a player names in a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    /// `+`: joins N-S and E-W
    Straight,
    /// `/`: joins N-W and E-S
    NorthWest,
    /// `\`: joins N-E and S-W
    NorthEast,
}

/// All shapes in candidate order
pub const SHAPES: [Shape; 3] = [Shape::Straight, Shape::NorthWest, Shape::NorthEast];

impl Shape {
    pub fn to_char(self) -> char {
        match self {
            Shape::Straight => '+',
            Shape::NorthWest => '/',
            Shape::NorthEast => '\\',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Shape::Straight),
            '/' => Some(Shape::NorthWest),
            '\\' => Some(Shape::NorthEast),
            _ => None,
        }
    }

    /// The two edge pairs joined by this shape's paths
    pub fn paths(self) -> [(Direction, Direction); 2] {
        use Direction::*;
        match self {
            Shape::Straight => [(North, South), (East, West)],
            Shape::NorthWest => [(North, West), (East, South)],
            Shape::NorthEast => [(North, East), (South, West)],
        }
    }

    /// Edge where a path entering through `entry` leaves the tile
    pub fn exit(self, entry: Direction) -> Direction {
        use Direction::*;
        match (self, entry) {
            (Shape::Straight, d) => d.opposite(),
            (Shape::NorthWest, North) => West,
            (Shape::NorthWest, West) => North,
            (Shape::NorthWest, East) => South,
            (Shape::NorthWest, South) => East,
            (Shape::NorthEast, North) => East,
            (Shape::NorthEast, East) => North,
            (Shape::NorthEast, South) => West,
            (Shape::NorthEast, West) => South,
        }
    }

    /// The shape whose path joins edges `a` and `b`
    pub fn joining(a: Direction, b: Direction) -> Option<Self> {
        SHAPES.into_iter().find(|s| a != b && s.exit(a) == b)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A placed tile: shape plus color assignment
///
/// Variant names list the two edges that carry red.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    StraightRedNs,
    StraightRedEw,
    NorthWestRedNw,
    NorthWestRedEs,
    NorthEastRedNe,
    NorthEastRedSw,
}

pub const TILES: [Tile; 6] = [
    Tile::StraightRedNs,
    Tile::StraightRedEw,
    Tile::NorthWestRedNw,
    Tile::NorthWestRedEs,
    Tile::NorthEastRedNe,
    Tile::NorthEastRedSw,
];

impl Tile {
    /// Orientation of `shape` whose east edge has color `east`
    pub fn new(shape: Shape, east: Color) -> Self {
        match (shape, east) {
            (Shape::Straight, Color::White) => Tile::StraightRedNs,
            (Shape::Straight, Color::Red) => Tile::StraightRedEw,
            (Shape::NorthWest, Color::White) => Tile::NorthWestRedNw,
            (Shape::NorthWest, Color::Red) => Tile::NorthWestRedEs,
            (Shape::NorthEast, Color::White) => Tile::NorthEastRedSw,
            (Shape::NorthEast, Color::Red) => Tile::NorthEastRedNe,
        }
    }

    pub fn shape(self) -> Shape {
        match self {
            Tile::StraightRedNs | Tile::StraightRedEw => Shape::Straight,
            Tile::NorthWestRedNw | Tile::NorthWestRedEs => Shape::NorthWest,
            Tile::NorthEastRedNe | Tile::NorthEastRedSw => Shape::NorthEast,
        }
    }

    pub fn east_color(self) -> Color {
        match self {
            Tile::StraightRedNs | Tile::NorthWestRedNw | Tile::NorthEastRedSw => Color::White,
            Tile::StraightRedEw | Tile::NorthWestRedEs | Tile::NorthEastRedNe => Color::Red,
        }
    }

    /// Color this tile presents on `edge`
    ///
    /// An edge joined to the east edge by a path shares its color; the other
    /// two edges carry the opposite color.
    pub fn edge_color(self, edge: Direction) -> Color {
        let east = self.east_color();
        if edge == Direction::East || self.shape().exit(Direction::East) == edge {
            east
        } else {
            east.opposite()
        }
    }
}

/// Colors presented toward a cell by its four neighbors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborColors {
    pub north: Option<Color>,
    pub east: Option<Color>,
    pub south: Option<Color>,
    pub west: Option<Color>,
}

impl NeighborColors {
    pub fn get(&self, direction: Direction) -> Option<Color> {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    /// Number of neighbors showing `color`
    pub fn count(&self, color: Color) -> usize {
        DIRECTIONS.iter().filter(|&&d| self.get(d) == Some(color)).count()
    }

    pub fn is_empty(&self) -> bool {
        DIRECTIONS.iter().all(|&d| self.get(d).is_none())
    }
}

/// Derive the east-path color of `shape` placed among `colors`
///
/// These three formulas are the rule set; with no neighbors every shape
/// ends up with a red west edge.
pub fn derive_color(shape: Shape, colors: &NeighborColors) -> Color {
    let white = |c: Option<Color>| c == Some(Color::White);
    let red = |c: Option<Color>| c == Some(Color::Red);
    let NeighborColors { north, east, south, west } = *colors;

    match shape {
        Shape::Straight => {
            if white(west) || white(east) || red(north) || red(south) {
                Color::White
            } else {
                Color::Red
            }
        }
        Shape::NorthWest => {
            if white(west) || white(north) || red(south) || red(east) {
                Color::Red
            } else {
                Color::White
            }
        }
        Shape::NorthEast => {
            if white(west) || white(south) || red(north) || red(east) {
                Color::Red
            } else {
                Color::White
            }
        }
    }
}

/// Tile that `shape` becomes when placed among `colors`
pub fn orientation_for(shape: Shape, colors: &NeighborColors) -> Tile {
    Tile::new(shape, derive_color(shape, colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    const OPTIONS: [Option<Color>; 3] = [None, Some(Color::White), Some(Color::Red)];

    fn all_neighbor_colors() -> Vec<NeighborColors> {
        let mut out = Vec::new();
        for north in OPTIONS {
            for east in OPTIONS {
                for south in OPTIONS {
                    for west in OPTIONS {
                        out.push(NeighborColors { north, east, south, west });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_tile_edges_match_variant_names() {
        let red_edges = |t: Tile| -> Vec<Direction> {
            DIRECTIONS.into_iter().filter(|&d| t.edge_color(d) == Color::Red).collect()
        };
        assert_eq!(red_edges(Tile::StraightRedNs), vec![North, South]);
        assert_eq!(red_edges(Tile::StraightRedEw), vec![East, West]);
        assert_eq!(red_edges(Tile::NorthWestRedNw), vec![North, West]);
        assert_eq!(red_edges(Tile::NorthWestRedEs), vec![East, South]);
        assert_eq!(red_edges(Tile::NorthEastRedNe), vec![North, East]);
        assert_eq!(red_edges(Tile::NorthEastRedSw), vec![South, West]);
    }

    #[test]
    fn test_tile_paths_are_opposite_colors() {
        for tile in TILES {
            let [(a, b), (c, d)] = tile.shape().paths();
            assert_eq!(tile.edge_color(a), tile.edge_color(b));
            assert_eq!(tile.edge_color(c), tile.edge_color(d));
            assert_ne!(tile.edge_color(a), tile.edge_color(c));
            assert_eq!(Tile::new(tile.shape(), tile.east_color()), tile);
        }
    }

    #[test]
    fn test_shape_exit_and_joining() {
        for shape in SHAPES {
            for d in DIRECTIONS {
                assert_eq!(shape.exit(shape.exit(d)), d);
                assert_eq!(Shape::joining(d, shape.exit(d)), Some(shape));
            }
        }
        assert_eq!(Shape::joining(North, North), None);
        assert_eq!(Shape::joining(West, East), Some(Shape::Straight));
        assert_eq!(Shape::joining(South, East), Some(Shape::NorthWest));
        assert_eq!(Shape::joining(West, South), Some(Shape::NorthEast));
    }

    #[test]
    fn test_shape_chars() {
        for shape in SHAPES {
            assert_eq!(Shape::from_char(shape.to_char()), Some(shape));
        }
        assert_eq!(Shape::from_char('x'), None);
    }

    #[test]
    fn test_derive_color_defaults_to_red_west_edge() {
        let empty = NeighborColors::default();
        assert_eq!(derive_color(Shape::Straight, &empty), Color::Red);
        assert_eq!(derive_color(Shape::NorthWest, &empty), Color::White);
        assert_eq!(derive_color(Shape::NorthEast, &empty), Color::White);
        for shape in SHAPES {
            assert_eq!(orientation_for(shape, &empty).edge_color(West), Color::Red);
        }
    }

    #[test]
    fn test_derive_color_table() {
        let white_west = NeighborColors { west: Some(Color::White), ..Default::default() };
        assert_eq!(derive_color(Shape::Straight, &white_west), Color::White);
        assert_eq!(derive_color(Shape::NorthWest, &white_west), Color::Red);
        assert_eq!(derive_color(Shape::NorthEast, &white_west), Color::Red);

        let red_north = NeighborColors { north: Some(Color::Red), ..Default::default() };
        assert_eq!(derive_color(Shape::Straight, &red_north), Color::White);
        assert_eq!(derive_color(Shape::NorthWest, &red_north), Color::White);
        assert_eq!(derive_color(Shape::NorthEast, &red_north), Color::Red);

        let white_south = NeighborColors { south: Some(Color::White), ..Default::default() };
        assert_eq!(derive_color(Shape::Straight, &white_south), Color::Red);
        assert_eq!(derive_color(Shape::NorthWest, &white_south), Color::White);
        assert_eq!(derive_color(Shape::NorthEast, &white_south), Color::Red);
    }

    #[test]
    fn test_derived_tile_agrees_with_single_neighbor() {
        // A lone neighbor edge is always honored by the derived orientation
        for colors in all_neighbor_colors() {
            let known: Vec<_> = DIRECTIONS.into_iter().filter(|&d| colors.get(d).is_some()).collect();
            if known.len() != 1 {
                continue;
            }
            for shape in SHAPES {
                let tile = orientation_for(shape, &colors);
                assert_eq!(Some(tile.edge_color(known[0])), colors.get(known[0]));
            }
        }
    }

    #[test]
    fn test_derive_color_deterministic() {
        for colors in all_neighbor_colors() {
            for shape in SHAPES {
                assert_eq!(derive_color(shape, &colors), derive_color(shape, &colors));
            }
        }
    }
}
