//! Cube dimensions and per-face geometry.

use cgmath::Vector3;
use cubesim_notation::Face;
use serde::{Deserialize, Serialize};

use crate::{Axis, Sign};

/// Physical dimensions of the cube.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct CubeGeometry {
    /// Edge length of a single piece.
    pub piece_size: f32,
    /// Gap between adjacent pieces.
    pub gap: f32,
    /// Largest distance, as a fraction of the spacing, that a piece may be
    /// from a grid point when a move is committed.
    pub drift_tolerance: f32,
}
impl Default for CubeGeometry {
    fn default() -> Self {
        Self {
            piece_size: 0.95,
            gap: 0.05,
            drift_tolerance: 0.001,
        }
    }
}
impl CubeGeometry {
    /// Returns the distance between the centers of adjacent pieces.
    pub fn spacing(&self) -> f32 {
        self.piece_size + self.gap
    }
    /// Returns the coordinate magnitude that separates an outer layer from
    /// the middle layer.
    pub fn threshold(&self) -> f32 {
        self.spacing() * 0.5
    }
}

/// Geometric properties of a [`Face`].
pub trait FaceGeometry: Sized {
    /// Returns the axis perpendicular to the face or slice.
    fn axis(self) -> Axis;
    /// Returns which layer along [`FaceGeometry::axis()`] the face selects:
    /// `Pos` or `Neg` for outer faces and `Zero` for slices.
    fn layer(self) -> Sign;
    /// Returns the rotation axis for the face. A positive rotation around
    /// this axis (right-hand rule) is a clockwise turn as seen from outside
    /// the face.
    fn rotation_axis(self) -> Vector3<f32>;
    /// Returns whether a piece at `position` belongs to the face.
    fn contains(self, position: Vector3<f32>, threshold: f32) -> bool;
    /// Returns the outer face pointing along `axis` in the direction `sign`,
    /// or `None` if `sign` is zero.
    fn from_normal(axis: Axis, sign: Sign) -> Option<Self>;
}

impl FaceGeometry for Face {
    fn axis(self) -> Axis {
        match self {
            Face::L | Face::R | Face::M => Axis::X,
            Face::U | Face::D | Face::E => Axis::Y,
            Face::F | Face::B | Face::S => Axis::Z,
        }
    }

    fn layer(self) -> Sign {
        match self {
            Face::R | Face::U | Face::F => Sign::Pos,
            Face::L | Face::D | Face::B => Sign::Neg,
            Face::M | Face::E | Face::S => Sign::Zero,
        }
    }

    fn rotation_axis(self) -> Vector3<f32> {
        match self {
            Face::U => Axis::Y.vector(Sign::Neg),
            Face::D | Face::E => Axis::Y.vector(Sign::Pos),
            Face::R => Axis::X.vector(Sign::Neg),
            Face::L | Face::M => Axis::X.vector(Sign::Pos),
            Face::F | Face::S => Axis::Z.vector(Sign::Neg),
            Face::B => Axis::Z.vector(Sign::Pos),
        }
    }

    fn contains(self, position: Vector3<f32>, threshold: f32) -> bool {
        let coordinate = position[self.axis().int()];
        match self.layer() {
            Sign::Pos => coordinate > threshold,
            Sign::Neg => coordinate < -threshold,
            Sign::Zero => coordinate.abs() < threshold,
        }
    }

    fn from_normal(axis: Axis, sign: Sign) -> Option<Self> {
        match (axis, sign) {
            (_, Sign::Zero) => None,
            (Axis::X, Sign::Pos) => Some(Face::R),
            (Axis::X, Sign::Neg) => Some(Face::L),
            (Axis::Y, Sign::Pos) => Some(Face::U),
            (Axis::Y, Sign::Neg) => Some(Face::D),
            (Axis::Z, Sign::Pos) => Some(Face::F),
            (Axis::Z, Sign::Neg) => Some(Face::B),
        }
    }
}
