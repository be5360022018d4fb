//! Face-turn notation for the 3x3x3 cube.
//!
//! A move is a single face or slice letter optionally followed by `'`
//! (counterclockwise) or `2` (half turn).
//!
//! ```
//! use cubesim_notation::{Face, Move, Turns, parse};
//!
//! assert_eq!(parse("R2"), Ok(Move::new(Face::R, Turns::Half)));
//! assert!(parse("X").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

mod errors;

pub use errors::NotationError;

/// Face or middle slice of the cube.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::EnumIter,
    strum::Display,
)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Face {
    /// Up face.
    U,
    /// Down face.
    D,
    /// Left face.
    L,
    /// Right face.
    R,
    /// Front face.
    F,
    /// Back face.
    B,
    /// Middle slice, between `L` and `R`. Turns the same direction as `L`.
    M,
    /// Equatorial slice, between `U` and `D`. Turns the same direction as `D`.
    E,
    /// Standing slice, between `F` and `B`. Turns the same direction as `F`.
    S,
}

impl Face {
    /// Outer faces in facelet string order.
    pub const OUTER: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Returns the face with the given symbol, or `None` if it is not one of
    /// `UDLRFBMES`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            'M' => Some(Face::M),
            'E' => Some(Face::E),
            'S' => Some(Face::S),
            _ => None,
        }
    }

    /// Returns the symbol for the face.
    pub fn symbol(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
            Face::M => 'M',
            Face::E => 'E',
            Face::S => 'S',
        }
    }

    /// Returns whether this is a middle slice rather than an outer face.
    pub fn is_slice(self) -> bool {
        matches!(self, Face::M | Face::E | Face::S)
    }
}

/// Amount to turn a face.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Turns {
    /// Quarter turn clockwise, as seen from outside the face.
    ///
    /// Example: `R`
    #[default]
    Clockwise,
    /// Quarter turn counterclockwise, as seen from outside the face.
    ///
    /// Example: `R'`
    CounterClockwise,
    /// Half turn. Direction does not matter.
    ///
    /// Example: `R2`
    Half,
}

impl Turns {
    /// Returns the signed number of clockwise quarter turns: 1, -1, or 2.
    pub fn quarter_turns(self) -> i8 {
        match self {
            Turns::Clockwise => 1,
            Turns::CounterClockwise => -1,
            Turns::Half => 2,
        }
    }

    /// Returns the turn that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turns::Clockwise => Turns::CounterClockwise,
            Turns::CounterClockwise => Turns::Clockwise,
            Turns::Half => Turns::Half,
        }
    }

    /// Returns the notation suffix: empty, `'`, or `2`.
    pub fn suffix(self) -> &'static str {
        match self {
            Turns::Clockwise => "",
            Turns::CounterClockwise => "'",
            Turns::Half => "2",
        }
    }
}

/// Single parsed move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Move {
    /// Face or slice to turn.
    pub face: Face,
    /// How far to turn it.
    pub turns: Turns,
}

impl Move {
    /// Constructs a move.
    pub const fn new(face: Face, turns: Turns) -> Self {
        Self { face, turns }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            face: self.face,
            turns: self.turns.inverse(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.symbol(), self.turns.suffix())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses a single move such as `R`, `U'`, or `M2`.
pub fn parse(s: &str) -> Result<Move, NotationError> {
    let mut chars = s.chars();
    let first = chars.next().ok_or(NotationError::Empty)?;
    let face = Face::from_char(first).ok_or(NotationError::UnknownFace(first))?;
    let suffix = chars.as_str();
    let turns = match suffix {
        "" => Turns::Clockwise,
        "'" => Turns::CounterClockwise,
        "2" => Turns::Half,
        _ => {
            return Err(NotationError::InvalidSuffix {
                notation: s.to_owned(),
                suffix: suffix.to_owned(),
            });
        }
    };
    Ok(Move { face, turns })
}

/// Parses a whitespace-separated sequence of moves. Fails on the first invalid
/// move, so either every move is returned or none is.
pub fn parse_sequence(s: &str) -> Result<Vec<Move>, NotationError> {
    s.split_whitespace().map(parse).collect()
}

/// Formats a sequence of moves separated by spaces.
pub fn format_sequence(moves: &[Move]) -> String {
    let mut ret = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            ret.push(' ');
        }
        ret += &mv.to_string();
    }
    ret
}

#[cfg(test)]
mod tests;
