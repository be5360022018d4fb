//! Conversion between cube state and facelet strings.
//!
//! A facelet string has 54 characters, one per sticker, in `URFDLB` face
//! order. Each face is listed row by row as seen from outside the cube, with
//! the `B` face on top of `U`, the `F` face on top of `D`, and the `U` face on
//! top of every side face. Each character names the face whose color the
//! sticker has, so a solved cube is
//! `UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB`.

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, PI};

use cgmath::prelude::*;
use cgmath::{Matrix3, Rad, Vector3};
use cubesim_notation::Face;
use itertools::Itertools;

use crate::cube::round_matrix;
use crate::{Axis, Cube, FaceGeometry, FaceletError, GridPos, Piece, Sign, UnsolvableReason};

/// Number of stickers on each face.
pub const FACELETS_PER_FACE: usize = 9;
/// Number of characters in a facelet string.
pub const FACELET_COUNT: usize = 6 * FACELETS_PER_FACE;

/// Returns the grid position of the piece that carries facelet `index` of
/// `face`.
fn facelet_slot(face: Face, index: usize) -> GridPos {
    // row and column, from -1 to 1
    let r = (index / 3) as i8 - 1;
    let c = (index % 3) as i8 - 1;
    let ints = match face {
        Face::U => [c, 1, r],
        Face::R => [1, -r, -c],
        Face::F => [c, -r, 1],
        Face::D => [c, -1, -r],
        Face::L => [-1, -r, c],
        Face::B => [-c, -r, -1],
        Face::M | Face::E | Face::S => unreachable!("slices have no facelets"),
    };
    GridPos::from_ints(ints).unwrap_or(GridPos::CORE)
}

/// Returns the outward normal of an outer face.
fn face_normal(face: Face) -> Vector3<f32> {
    face.axis().vector(face.layer())
}

impl Cube {
    /// Returns the state of the cube as a facelet string.
    pub fn to_facelets(&self) -> String {
        let mut ret = String::with_capacity(FACELET_COUNT);
        for face in Face::OUTER {
            let normal = face_normal(face);
            for i in 0..FACELETS_PER_FACE {
                let slot = facelet_slot(face, i);
                let color = self
                    .piece_at(slot)
                    .and_then(|id| {
                        // Rotate the sticker normal back into the piece's
                        // solved frame to find which face it belongs to.
                        let home_normal = self[id].orientation.transpose() * normal;
                        let (axis, sign) = Axis::nearest(home_normal)?;
                        Face::from_normal(axis, sign)
                    })
                    .map_or('?', Face::symbol);
                ret.push(color);
            }
        }
        ret
    }

    /// Replaces the whole state of the cube with the one described by a
    /// facelet string, bypassing any animation.
    ///
    /// The cube is not modified if the string is invalid or describes a state
    /// that moves cannot reach from a solved cube. Face centers have
    /// only one sticker, so their spin cannot be recovered; each one is given
    /// the smallest rotation that moves it to its new face.
    pub fn set_facelets(&mut self, facelets: &str) -> Result<(), FaceletError> {
        let len = facelets.chars().count();
        if len != FACELET_COUNT {
            return Err(FaceletError::WrongLength(len));
        }

        // Group stickers by the position of the piece they are on.
        let mut slots: BTreeMap<GridPos, Vec<(Face, Face)>> = BTreeMap::new();
        for (index, c) in facelets.chars().enumerate() {
            let color = Face::from_char(c)
                .filter(|f| !f.is_slice())
                .ok_or(FaceletError::InvalidColor { index, color: c })?;
            let face = Face::OUTER[index / FACELETS_PER_FACE];
            let slot = facelet_slot(face, index % FACELETS_PER_FACE);
            slots.entry(slot).or_default().push((face, color));
        }

        let spacing = self.geometry().spacing();
        let mut new_pieces: Vec<Option<Piece>> = vec![None; Cube::PIECE_COUNT];
        for (slot, stickers) in slots {
            let colors = || stickers.iter().map(|(_, color)| color.symbol()).collect::<String>();

            let mut home = GridPos::CORE;
            for &(_, color) in &stickers {
                let axis = color.axis();
                if home[axis].is_nonzero() {
                    // two colors from opposite faces
                    return Err(FaceletError::UnknownPiece {
                        slot,
                        colors: colors(),
                    });
                }
                home[axis] = color.layer();
            }

            let id = self
                .piece_with_home(home)
                .ok_or_else(|| FaceletError::UnknownPiece {
                    slot,
                    colors: colors(),
                })?;
            let orientation = orientation_from_stickers(&stickers)
                .ok_or(FaceletError::InvalidOrientation { slot })?;

            let entry = &mut new_pieces[id.index()];
            if entry.is_some() {
                return Err(FaceletError::DuplicatePiece {
                    colors: colors().chars().sorted().collect(),
                });
            }
            *entry = Some(Piece {
                home,
                grid: slot,
                position: slot.to_continuous(spacing),
                orientation,
            });
        }

        // Every slot holds a distinct piece, and there are as many slots as
        // pieces, so every piece has been placed.
        let new_pieces: Vec<Piece> = new_pieces.into_iter().flatten().collect();
        check_solvable(&new_pieces)?;
        self.pieces = new_pieces;
        log::info!("imported cube state {facelets}");
        Ok(())
    }
}

/// Returns the rotation that carries each sticker's solved normal (given by
/// its color) to its current normal (given by the face it is on), or `None`
/// if there is no such rotation.
fn orientation_from_stickers(stickers: &[(Face, Face)]) -> Option<Matrix3<f32>> {
    let pairs = stickers
        .iter()
        .map(|&(face, color)| (face_normal(color), face_normal(face)))
        .collect_vec();

    let rotation = match pairs.as_slice() {
        [] => return None,
        [(from, to)] => rotation_between(*from, *to),
        [(n1, m1), (n2, m2), ..] => {
            let from = Matrix3::from_cols(*n1, *n2, n1.cross(*n2));
            let to = Matrix3::from_cols(*m1, *m2, m1.cross(*m2));
            to * from.transpose()
        }
    };

    pairs
        .iter()
        .all(|&(from, to)| (rotation * from).dot(to) > 0.5)
        .then_some(rotation)
}

/// Checks that a state can be reached from the solved cube by moves.
///
/// Slice moves carry the centers along, so pieces are measured relative to
/// the rotation that takes each center from its home to its current slot.
fn check_solvable(pieces: &[Piece]) -> Result<(), UnsolvableReason> {
    let current_slot = |home: [i8; 3]| {
        let home = GridPos::from_ints(home)?;
        let piece = pieces.iter().find(|p| p.home == home)?;
        Some(piece.grid.to_continuous(1.0))
    };
    let (Some(up), Some(front)) = (current_slot([0, 1, 0]), current_slot([0, 0, 1])) else {
        return Err(UnsolvableReason::Centers);
    };
    let frame = Matrix3::from_cols(up.cross(front), up, front);

    let centers_in_frame = pieces
        .iter()
        .filter(|p| p.home.sticker_count() == 1)
        .all(|p| {
            let moved = frame * p.home.to_continuous(1.0);
            (moved - p.grid.to_continuous(1.0)).magnitude2() < 0.25
        });
    if !centers_in_frame {
        return Err(UnsolvableReason::Centers);
    }

    let inverse = frame.transpose();
    let mut twist = 0;
    let mut flip = 0;
    let mut corners = vec![];
    let mut edges = vec![];
    for piece in pieces {
        let slot = GridPos::from_continuous(inverse * piece.grid.to_continuous(1.0), 0.5);
        let orientation = inverse * piece.orientation;
        match piece.home.sticker_count() {
            3 => {
                twist += corner_twist(piece.home, slot, orientation);
                corners.push((piece.home, slot));
            }
            2 => {
                flip += edge_flip(piece.home, slot, orientation);
                edges.push((piece.home, slot));
            }
            _ => (),
        }
    }

    if twist % 3 != 0 {
        Err(UnsolvableReason::CornerTwist)
    } else if flip % 2 != 0 {
        Err(UnsolvableReason::EdgeFlip)
    } else if is_odd_permutation(corners) != is_odd_permutation(edges) {
        Err(UnsolvableReason::Parity)
    } else {
        Ok(())
    }
}

/// Returns how far the `U` or `D` sticker of a corner is from the `U` or `D`
/// face of its slot, counting clockwise as seen from outside the corner.
fn corner_twist(home: GridPos, slot: GridPos, orientation: Matrix3<f32>) -> usize {
    let sticker = orientation * Axis::Y.vector(home.y());
    let [x, y, z] = [Axis::X, Axis::Y, Axis::Z].map(|axis| axis.vector(slot[axis]));
    let clockwise = if Matrix3::from_cols(y, x, z).determinant() < 0.0 {
        [y, x, z]
    } else {
        [y, z, x]
    };
    clockwise
        .iter()
        .position(|normal| normal.dot(sticker) > 0.5)
        .unwrap_or(0)
}

/// Returns 1 if an edge is flipped, or 0 if not. An edge is unflipped when its
/// `U` or `D` sticker, or else its `F` or `B` sticker, is on the `U` or `D`
/// face, or else the `F` or `B` face, of its slot.
fn edge_flip(home: GridPos, slot: GridPos, orientation: Matrix3<f32>) -> usize {
    let primary_axis = |pos: GridPos| {
        if pos.y().is_nonzero() {
            Axis::Y
        } else {
            Axis::Z
        }
    };
    let home_axis = primary_axis(home);
    let slot_axis = primary_axis(slot);
    let sticker = orientation * home_axis.vector(home[home_axis]);
    usize::from(sticker.dot(slot_axis.vector(slot[slot_axis])) < 0.5)
}

/// Returns whether the permutation taking each home to its slot is odd.
fn is_odd_permutation(mut pieces: Vec<(GridPos, GridPos)>) -> bool {
    pieces.sort();
    let inversions = pieces
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.1 > b.1)
        .count();
    inversions % 2 == 1
}

/// Returns the smallest rotation that carries unit vector `from` to unit
/// vector `to`, where both are axis-aligned.
fn rotation_between(from: Vector3<f32>, to: Vector3<f32>) -> Matrix3<f32> {
    let dot = from.dot(to);
    if dot > 0.5 {
        Matrix3::identity()
    } else if dot < -0.5 {
        let axis = Axis::nearest(from).map_or(Axis::X, |(axis, _)| axis.next());
        round_matrix(Matrix3::from_axis_angle(axis.vector(Sign::Pos), Rad(PI)))
    } else {
        round_matrix(Matrix3::from_axis_angle(from.cross(to), Rad(FRAC_PI_2)))
    }
}
