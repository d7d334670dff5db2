//! Error types for board operations

use crate::board::Coord;
use crate::notation::ParseMoveError;
use crate::rules::Violation;
use crate::tiles::Shape;

/// Errors from playing or choosing moves
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraxError {
    #[error("cell {0} is already occupied")]
    Occupied(Coord),

    #[error("cell {0} has no placed neighbor")]
    Isolated(Coord),

    #[error("illegal {shape} at {at}: {violation}")]
    Illegal {
        at: Coord,
        shape: Shape,
        violation: Violation,
    },

    #[error("forced play contradicts itself at {at}")]
    ForcedContradiction { at: Coord },

    #[error("coordinate out of range")]
    OutOfRange,

    #[error("no legal move available")]
    NoLegalMove,

    #[error(transparent)]
    Notation(#[from] ParseMoveError),
}

pub type Result<T> = std::result::Result<T, TraxError>;
