use thiserror::Error;

use crate::{GridPos, PieceId};

/// Error produced when a rotation leaves a piece too far from the grid.
///
/// This indicates a bug in the rotation geometry rather than bad input.
#[derive(Error, Debug, Copy, Clone, PartialEq)]
#[error("{piece} is {drift} spacings away from the nearest grid point")]
pub struct DriftError {
    /// Piece that drifted.
    pub piece: PieceId,
    /// Distance from the nearest grid point, as a multiple of the spacing.
    pub drift: f32,
}

/// Error produced when importing a facelet string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FaceletError {
    /// Wrong number of facelets
    #[error("expected 54 facelets, got {0}")]
    WrongLength(usize),
    /// Character is not one of `URFDLB`
    #[error("invalid color {color:?} at facelet {index}")]
    InvalidColor {
        /// Index of the facelet in the string.
        index: usize,
        /// Character found.
        color: char,
    },
    /// Colors at a position do not match any piece
    #[error("no piece has colors {colors:?} (found at {slot})")]
    UnknownPiece {
        /// Position where the colors were found.
        slot: GridPos,
        /// Colors found at that position.
        colors: String,
    },
    /// Same piece appears at two positions
    #[error("piece with colors {colors:?} appears more than once")]
    DuplicatePiece {
        /// Colors of the piece.
        colors: String,
    },
    /// Colors of a piece appear in mirrored order
    #[error("piece at {slot} is mirrored")]
    InvalidOrientation {
        /// Position of the piece.
        slot: GridPos,
    },
    /// Every piece is valid on its own, but moves cannot reach the state
    #[error("state cannot be reached from a solved cube: {0}")]
    Unsolvable(#[from] UnsolvableReason),
}

/// Reason that a cube state cannot be reached from the solved state.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnsolvableReason {
    /// Centers are not in any rotation of their solved arrangement
    #[error("centers are out of place")]
    Centers,
    /// Corner twists do not cancel out
    #[error("a corner is twisted")]
    CornerTwist,
    /// Odd number of flipped edges
    #[error("an edge is flipped")]
    EdgeFlip,
    /// Corner and edge permutations have different parity
    #[error("two pieces are swapped")]
    Parity,
}
