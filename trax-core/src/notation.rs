//! Move text encoding: `<column><row><shape>`
//!
//! Column `@` is offset 0; other columns are bijective base-26 letters
//! (`A` = 1 .. `Z` = 26, `AA` = 27, ...). The row is a decimal integer and
//! the shape one of `+`, `/`, `\`. Examples: `@0+`, `B3/`, `AA-1\`.

use crate::tiles::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ALPHABET: u32 = 26;

/// A move relative to the board's move origin
///
/// Serializes as its text form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    pub col: u32,
    pub row: i32,
    pub shape: Shape,
}

impl Move {
    pub const fn new(col: u32, row: i32, shape: Shape) -> Self {
        Self { col, row, shape }
    }
}

/// Errors from parsing move text
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseMoveError {
    #[error("empty move string")]
    Empty,

    #[error("move {0:?} has no column")]
    MissingColumn(String),

    #[error("column in {0:?} is too large")]
    ColumnOverflow(String),

    #[error("invalid row in move {0:?}")]
    InvalidRow(String),

    #[error("invalid shape {0:?}, expected '+', '/' or '\\'")]
    InvalidShape(char),
}

/// Render a column offset (`@`, `A`..`Z`, `AA`, ...)
pub fn column_name(col: u32) -> String {
    if col == 0 {
        return "@".to_string();
    }
    let mut n = col;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + (n % ALPHABET) as u8));
        n /= ALPHABET;
    }
    letters.iter().rev().collect()
}

/// Parse a leading column name, returning the column and the rest of `s`
fn split_column(s: &str) -> Result<(u32, &str), ParseMoveError> {
    if let Some(rest) = s.strip_prefix('@') {
        return Ok((0, rest));
    }

    let len = s.chars().take_while(|c| c.is_ascii_uppercase()).count();
    if len == 0 {
        return Err(ParseMoveError::MissingColumn(s.to_string()));
    }

    let mut col: u32 = 0;
    for c in s[..len].bytes() {
        let digit = u32::from(c - b'A') + 1;
        col = col
            .checked_mul(ALPHABET)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| ParseMoveError::ColumnOverflow(s.to_string()))?;
    }
    Ok((col, &s[len..]))
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let shape_char = s.chars().last().ok_or(ParseMoveError::Empty)?;
        let shape = Shape::from_char(shape_char).ok_or(ParseMoveError::InvalidShape(shape_char))?;

        let body = &s[..s.len() - shape_char.len_utf8()];
        let (col, row_text) = split_column(body)?;
        let row = row_text
            .parse::<i32>()
            .map_err(|_| ParseMoveError::InvalidRow(s.to_string()))?;

        Ok(Move { col, row, shape })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", column_name(self.col), self.row, self.shape.to_char())
    }
}

impl TryFrom<String> for Move {
    type Error = ParseMoveError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}
