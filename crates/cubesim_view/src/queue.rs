use std::collections::VecDeque;

use cubesim_core::Move;
use cubesim_prefs::AnimationPreferences;
use web_time::Duration;

use crate::MoveId;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Shortest duration that dynamic twist speed reduces a move to.
const MIN_TWIST_DURATION: Duration = Duration::from_millis(50);

/// Move waiting to be animated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct QueuedMove {
    pub id: MoveId,
    pub mv: Move,
}

/// Queue of moves that have not started animating yet.
#[derive(Debug, Default, Clone)]
pub(crate) struct MoveQueue {
    queue: VecDeque<QueuedMove>,
    /// Maximum number of moves queued or animating (reset when both are
    /// empty).
    queue_max: usize,
}
impl MoveQueue {
    /// Adds a move to the back of the queue. `animating` is whether another
    /// move is currently animating.
    pub fn push(&mut self, queued: QueuedMove, animating: bool) {
        self.queue.push_back(queued);

        // Update queue_max.
        let total = self.queue.len() + animating as usize;
        self.queue_max = std::cmp::max(self.queue_max, total);
    }
    /// Removes the move at the front of the queue. If there is none, the
    /// backlog is forgotten.
    pub fn pop(&mut self) -> Option<QueuedMove> {
        let ret = self.queue.pop_front();
        if ret.is_none() {
            self.queue_max = 0;
        }
        ret
    }
    /// Removes every move from the queue.
    pub fn clear(&mut self) -> Vec<QueuedMove> {
        self.queue_max = 0;
        self.queue.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedMove> {
        self.queue.iter()
    }

    /// Returns how long the next move should take to animate.
    pub fn twist_duration(&self, prefs: &AnimationPreferences) -> Duration {
        // Guard against negative and NaN durations from hand-edited prefs.
        let base = Duration::try_from_secs_f32(prefs.twist_duration).unwrap_or_default();
        if !prefs.dynamic_twist_speed || base <= MIN_TWIST_DURATION {
            return base;
        }

        // Twist exponentially faster if there are/were more twists in the
        // queue.
        let backlog = self.queue_max.saturating_sub(1) as f32;
        let speed_mod = (backlog * EXP_TWIST_FACTOR).exp();
        base.div_f32(speed_mod).max(MIN_TWIST_DURATION)
    }
}
