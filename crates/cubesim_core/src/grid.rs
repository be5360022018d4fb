//! Axes and integer piece positions.

use std::fmt;
use std::ops::{Index, IndexMut};

use cgmath::Vector3;

use crate::Sign;

/// A 3-dimensional axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl Axis {
    /// Returns an integer index for this axis; X = 0, Y = 1, Z = 2.
    pub fn int(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
    /// Returns the axis after this one, wrapping from Z back to X.
    pub fn next(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::Z,
            Self::Z => Self::X,
        }
    }
    /// Returns the unit vector along this axis with the given sign.
    pub fn vector(self, sign: Sign) -> Vector3<f32> {
        let mut ret = Vector3::new(0.0, 0.0, 0.0);
        ret[self.int()] = sign.float();
        ret
    }
    /// Returns the axis and sign of the largest component of `v`, or `None`
    /// if `v` is zero.
    pub fn nearest(v: Vector3<f32>) -> Option<(Self, Sign)> {
        let axis = Axis::iter().max_by(|&a, &b| v[a.int()].abs().total_cmp(&v[b.int()].abs()))?;
        let sign = Sign::classify(v[axis.int()], 0.5);
        sign.is_nonzero().then_some((axis, sign))
    }
    /// Returns an iterator over all axes.
    pub fn iter() -> impl Clone + Iterator<Item = Axis> {
        [Axis::X, Axis::Y, Axis::Z].into_iter()
    }
}

/// Integer grid position of a piece. Each coordinate is -1, 0, or 1.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos(pub [Sign; 3]);
impl Index<Axis> for GridPos {
    type Output = Sign;
    fn index(&self, axis: Axis) -> &Sign {
        &self.0[axis.int()]
    }
}
impl IndexMut<Axis> for GridPos {
    fn index_mut(&mut self, axis: Axis) -> &mut Sign {
        &mut self.0[axis.int()]
    }
}
impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.ints();
        write!(f, "({x}, {y}, {z})")
    }
}
impl GridPos {
    /// Position at the center of the puzzle, which has no piece.
    pub const CORE: Self = Self([Sign::Zero; 3]);

    /// Constructs a grid position from integer coordinates. Returns `None` if
    /// any coordinate is outside the range -1..=1.
    pub fn from_ints([x, y, z]: [i8; 3]) -> Option<Self> {
        Some(Self([Sign::from_int(x)?, Sign::from_int(y)?, Sign::from_int(z)?]))
    }
    /// Returns the integer coordinates.
    pub fn ints(self) -> [i8; 3] {
        self.0.map(Sign::int)
    }

    /// Returns the X coordinate.
    pub fn x(self) -> Sign {
        self[Axis::X]
    }
    /// Returns the Y coordinate.
    pub fn y(self) -> Sign {
        self[Axis::Y]
    }
    /// Returns the Z coordinate.
    pub fn z(self) -> Sign {
        self[Axis::Z]
    }

    /// Returns the number of visible stickers on a piece at this position: 1
    /// for face centers, 2 for edges, 3 for corners.
    pub fn sticker_count(self) -> usize {
        self.0.iter().filter(|s| s.is_nonzero()).count()
    }

    /// Classifies a continuous position by comparing each coordinate against
    /// `threshold`.
    pub fn from_continuous(v: Vector3<f32>, threshold: f32) -> Self {
        Self([
            Sign::classify(v.x, threshold),
            Sign::classify(v.y, threshold),
            Sign::classify(v.z, threshold),
        ])
    }
    /// Returns the rest position of a piece at this grid position.
    pub fn to_continuous(self, spacing: f32) -> Vector3<f32> {
        Vector3::new(
            self.x().float() * spacing,
            self.y().float() * spacing,
            self.z().float() * spacing,
        )
    }

    /// Returns an iterator over every position except the core, in Z-major
    /// order.
    pub fn iter_pieces() -> impl Iterator<Item = Self> {
        Sign::iter()
            .flat_map(|z| Sign::iter().map(move |y| (y, z)))
            .flat_map(|(y, z)| Sign::iter().map(move |x| Self([x, y, z])))
            .filter(|&p| p != Self::CORE)
    }
}
