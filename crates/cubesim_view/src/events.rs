use std::fmt;

use cubesim_core::Move;

/// Unique ID for a move submitted to a [`crate::MoveEngine`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveId(pub u64);
impl fmt::Display for MoveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move #{}", self.0)
    }
}

/// Notification sent to subscribers when a move leaves the queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveEvent {
    /// Move was committed to the cube.
    Completed {
        /// ID returned when the move was enqueued.
        id: MoveId,
        /// Move that was committed.
        mv: Move,
    },
    /// Move was discarded without being committed.
    Cancelled {
        /// ID returned when the move was enqueued.
        id: MoveId,
        /// Move that was discarded.
        mv: Move,
    },
}
impl MoveEvent {
    /// Returns the ID of the move.
    pub fn id(self) -> MoveId {
        match self {
            MoveEvent::Completed { id, .. } | MoveEvent::Cancelled { id, .. } => id,
        }
    }
    /// Returns the move.
    pub fn mv(self) -> Move {
        match self {
            MoveEvent::Completed { mv, .. } | MoveEvent::Cancelled { mv, .. } => mv,
        }
    }
}
