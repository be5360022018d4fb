use cubesim_core::{DriftError, FaceletError, NotationError};
use thiserror::Error;

/// Error produced by the move engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Move string could not be parsed. The queue is unchanged.
    #[error("invalid notation: {0}")]
    InvalidNotation(#[from] NotationError),
    /// Committing a move would have left a piece off the grid. The move and
    /// every queued move are cancelled.
    #[error("drift out of tolerance: {0}")]
    DriftOutOfTolerance(#[from] DriftError),
    /// Facelet string could not be imported. The engine is unchanged.
    #[error("invalid facelets: {0}")]
    InvalidFacelets(#[from] FaceletError),
}
