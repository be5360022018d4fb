//! Piece model for the 3x3x3 cube.
//!
//! The cube is stored as 26 pieces on a grid with coordinates in {-1, 0, 1}.
//! Moves select pieces by comparing their continuous positions against half
//! the piece spacing, rotate them as a rigid group, and then snap them back to
//! the grid so that floating-point error never accumulates.

mod cube;
mod errors;
pub mod facelets;
mod geometry;
mod grid;
mod piece;
mod sign;

pub use cube::{Cube, target_angle};
pub use cubesim_notation::{self as notation, Face, Move, NotationError, Turns};
pub use errors::{DriftError, FaceletError, UnsolvableReason};
pub use geometry::{CubeGeometry, FaceGeometry};
pub use grid::{Axis, GridPos};
pub use piece::{Piece, PieceId};
pub use sign::Sign;

#[cfg(test)]
mod tests;
