//! Sign enum.

/// Positive, negative, or zero.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Zero.
    #[default]
    Zero = 0,
    /// Positive.
    Pos = 1,
}
impl Sign {
    /// Returns an integer representation of the sign (either -1, 0, or 1).
    pub const fn int(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Zero => 0,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0, 0.0,
    /// or 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns the sign of an integer, or `None` if it is not -1, 0, or 1.
    pub const fn from_int(i: i8) -> Option<Self> {
        match i {
            -1 => Some(Sign::Neg),
            0 => Some(Sign::Zero),
            1 => Some(Sign::Pos),
            _ => None,
        }
    }
    /// Classifies a coordinate: `Zero` if its magnitude is below `threshold`,
    /// otherwise the sign of the coordinate.
    pub fn classify(x: f32, threshold: f32) -> Self {
        if x.abs() < threshold {
            Sign::Zero
        } else if x > 0.0 {
            Sign::Pos
        } else {
            Sign::Neg
        }
    }
    /// Returns true if `Sign::Zero` or false otherwise.
    pub const fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }
    /// Returns false if `Sign::Zero` or true otherwise.
    pub const fn is_nonzero(self) -> bool {
        !self.is_zero()
    }

    /// Returns an iterator over all signs.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Neg, Sign::Zero, Sign::Pos].into_iter()
    }
}
