//! The 3x3x3 cube as a set of pieces on a grid.

use std::f32::consts::FRAC_PI_2;
use std::ops::Index;

use cgmath::prelude::*;
use cgmath::{Matrix3, Rad, Vector3};
use cubesim_notation::{Face, Move};

use crate::{CubeGeometry, DriftError, FaceGeometry, GridPos, Piece, PieceId};

/// State of a 3x3x3 cube: 26 pieces, each with a grid position, a continuous
/// position, and an orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    geometry: CubeGeometry,
    pub(crate) pieces: Vec<Piece>,
}
impl Default for Cube {
    fn default() -> Self {
        Self::new(CubeGeometry::default())
    }
}
impl Index<PieceId> for Cube {
    type Output = Piece;

    fn index(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }
}
impl Cube {
    /// Number of pieces in the cube.
    pub const PIECE_COUNT: usize = 26;

    /// Constructs a solved cube.
    pub fn new(geometry: CubeGeometry) -> Self {
        let spacing = geometry.spacing();
        let pieces = GridPos::iter_pieces()
            .map(|home| Piece::at_rest(home, spacing))
            .collect();
        Self { geometry, pieces }
    }
    /// Recreates every piece in its solved position.
    pub fn reset(&mut self) {
        *self = Self::new(self.geometry);
    }

    /// Returns the dimensions of the cube.
    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }
    /// Returns a piece.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self[id]
    }
    /// Returns all pieces, indexed by [`PieceId`].
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
    /// Returns an iterator over all piece IDs.
    pub fn piece_ids(&self) -> impl Iterator<Item = PieceId> + use<> {
        (0..Self::PIECE_COUNT as u8).map(PieceId)
    }
    /// Returns the piece currently at `grid`, or `None` for the core.
    pub fn piece_at(&self, grid: GridPos) -> Option<PieceId> {
        self.piece_ids().find(|&id| self[id].grid == grid)
    }
    /// Returns the piece whose solved position is `home`, or `None` for the
    /// core.
    pub fn piece_with_home(&self, home: GridPos) -> Option<PieceId> {
        self.piece_ids().find(|&id| self[id].home == home)
    }

    /// Returns the pieces that a move of `face` turns.
    ///
    /// Selection compares continuous positions against half the spacing, so
    /// it stays correct as long as positions are snapped after every move.
    pub fn pieces_for_face(&self, face: Face) -> Vec<PieceId> {
        let threshold = self.geometry.threshold();
        self.piece_ids()
            .filter(|&id| face.contains(self[id].position, threshold))
            .collect()
    }
    /// Returns the rotation axis for `face`. See
    /// [`FaceGeometry::rotation_axis()`].
    pub fn axis_for_face(&self, face: Face) -> Vector3<f32> {
        face.rotation_axis()
    }

    /// Rotates and snaps the pieces of a move immediately, with no animation.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), DriftError> {
        let pieces = self.pieces_for_face(mv.face);
        self.commit_rotation(&pieces, mv.face.rotation_axis(), target_angle(mv))
    }
    /// Applies a sequence of moves with no animation.
    pub fn apply_moves(&mut self, moves: &[Move]) -> Result<(), DriftError> {
        moves.iter().try_for_each(|&mv| self.apply_move(mv))
    }

    /// Rotates `pieces` by `angle` radians around `axis`, then snaps their
    /// positions to the grid and recomputes their grid positions.
    ///
    /// If any piece would end up further from the grid than the drift
    /// tolerance allows, no piece is modified.
    pub fn commit_rotation(
        &mut self,
        pieces: &[PieceId],
        axis: Vector3<f32>,
        angle: f32,
    ) -> Result<(), DriftError> {
        let rotation = Matrix3::from_axis_angle(axis, Rad(angle));
        let spacing = self.geometry.spacing();
        let threshold = self.geometry.threshold();
        let tolerance = self.geometry.drift_tolerance * spacing;

        let mut new_states = Vec::with_capacity(pieces.len());
        for &id in pieces {
            let piece = &self[id];
            let raw = rotation * piece.position;
            let snapped = raw.map(|c| (c / spacing).round() * spacing);
            let drift = (snapped - raw).magnitude();
            // NaN fails this check too
            if !(drift <= tolerance) {
                return Err(DriftError {
                    piece: id,
                    drift: drift / spacing,
                });
            }
            let orientation = round_matrix(rotation * piece.orientation);
            new_states.push((id, snapped, orientation));
        }

        for (id, position, orientation) in new_states {
            let piece = &mut self.pieces[id.index()];
            piece.position = position;
            piece.orientation = orientation;
            piece.grid = GridPos::from_continuous(position, threshold);
        }
        Ok(())
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        let facelets = self.to_facelets().into_bytes();
        facelets
            .chunks(crate::facelets::FACELETS_PER_FACE)
            .all(|face| face.iter().all(|&c| c == face[0]))
    }
}

/// Returns the signed angle in radians that a move turns its pieces around
/// [`FaceGeometry::rotation_axis()`].
pub fn target_angle(mv: Move) -> f32 {
    mv.turns.quarter_turns() as f32 * FRAC_PI_2
}

/// Rounds each entry of a matrix to the nearest integer. This is exact for
/// rotations that permute the axes.
pub(crate) fn round_matrix(m: Matrix3<f32>) -> Matrix3<f32> {
    Matrix3::from_cols(m.x.map(f32::round), m.y.map(f32::round), m.z.map(f32::round))
}
