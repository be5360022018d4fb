use std::fmt;

use cgmath::{Matrix3, Matrix4, SquareMatrix, Vector3};

use crate::GridPos;

/// Index of a piece within a [`crate::Cube`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub(crate) u8);
impl PieceId {
    /// Returns the index of the piece in [`crate::Cube::pieces()`].
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece #{}", self.0)
    }
}

/// One of the 26 visible pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub(crate) home: GridPos,
    pub(crate) grid: GridPos,
    pub(crate) position: Vector3<f32>,
    pub(crate) orientation: Matrix3<f32>,
}
impl Piece {
    pub(crate) fn at_rest(home: GridPos, spacing: f32) -> Self {
        Self {
            home,
            grid: home,
            position: home.to_continuous(spacing),
            orientation: Matrix3::identity(),
        }
    }

    /// Returns the position of the piece when the cube is solved.
    pub fn home(&self) -> GridPos {
        self.home
    }
    /// Returns the current grid position of the piece.
    pub fn grid(&self) -> GridPos {
        self.grid
    }
    /// Returns the current position of the piece's center.
    pub fn position(&self) -> Vector3<f32> {
        self.position
    }
    /// Returns the rotation from the piece's solved orientation to its
    /// current orientation. At rest, every entry is -1, 0, or 1.
    pub fn orientation(&self) -> Matrix3<f32> {
        self.orientation
    }
    /// Returns the model matrix of the piece, not including any rotation
    /// group it is part of.
    pub fn transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position) * Matrix4::from(self.orientation)
    }
}
