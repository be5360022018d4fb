use thiserror::Error;

/// Error produced when parsing a move.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotationError {
    /// Empty move
    #[error("empty move")]
    Empty,
    /// First character is not one of `UDLRFBMES`
    #[error("unknown face or slice {0:?}")]
    UnknownFace(char),
    /// Anything after the face other than `'` or `2`
    #[error("invalid suffix {suffix:?} in move {notation:?}")]
    InvalidSuffix {
        /// Whole move string.
        notation: String,
        /// Characters following the face.
        suffix: String,
    },
}
