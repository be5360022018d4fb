//! Animated move engine for the 3x3x3 cube.
//!
//! [`MoveEngine`] owns a [`Cube`] and a queue of moves. Each call to
//! [`MoveEngine::step()`] advances the move at the front of the queue; while a
//! move is animating, its pieces form a [`RotationGroup`] whose transform is
//! applied on top of each piece's rest transform. When the animation
//! finishes, the exact rotation is committed to the cube and a
//! [`MoveEvent::Completed`] event is sent to every subscriber.
//!
//! ```
//! use cubesim_view::MoveEngine;
//! use web_time::{Duration, Instant};
//!
//! let mut engine = MoveEngine::default();
//! engine.enqueue_sequence("R U R' U'").unwrap();
//! let mut now = Instant::now();
//! while engine.step(now).unwrap() {
//!     now += Duration::from_millis(16);
//! }
//! assert!(!engine.cube().is_solved());
//! ```

mod engine;
mod errors;
mod events;
mod queue;
mod rotation;

pub use cubesim_core::Cube;
pub use engine::{ActiveMove, EngineState, MoveEngine};
pub use errors::EngineError;
pub use events::{MoveEvent, MoveId};
pub use rotation::RotationGroup;
