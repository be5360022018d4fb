use std::sync::mpsc;

use cgmath::Matrix4;
use cubesim_core::{Cube, CubeGeometry, FaceGeometry, Move, notation, target_angle};
use cubesim_prefs::{AnimationPreferences, Preferences};
use itertools::Itertools;
use web_time::{Duration, Instant};

use crate::queue::{MoveQueue, QueuedMove};
use crate::{EngineError, MoveEvent, MoveId, RotationGroup};

/// Whether the engine is animating a move.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum EngineState {
    /// No move is animating and the queue is empty.
    #[default]
    Idle,
    /// A move is animating. More may be queued behind it.
    Animating(ActiveMove),
}

/// Move that is currently animating.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveMove {
    id: MoveId,
    mv: Move,
    group: RotationGroup,
    /// Time of the first step after the move became active, or `None` if
    /// there has not been one yet.
    start: Option<Instant>,
    duration: Duration,
}
impl ActiveMove {
    /// Returns the ID of the move.
    pub fn id(&self) -> MoveId {
        self.id
    }
    /// Returns the move.
    pub fn mv(&self) -> Move {
        self.mv
    }
    /// Returns the pieces that are turning.
    pub fn group(&self) -> &RotationGroup {
        &self.group
    }
    /// Returns how long the animation takes.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns the linear progress of the animation at `now`, from 0.0 to
    /// 1.0.
    fn progress(&self, now: Instant) -> f32 {
        let Some(start) = self.start else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Cube simulation that animates queued moves one at a time.
///
/// The engine is driven by calling [`MoveEngine::step()`] once per frame.
/// Moves are committed to the cube in the order they are enqueued, and only
/// once their animation has finished.
#[derive(Debug)]
pub struct MoveEngine {
    /// Cube with every finished move applied. Pieces of the animating move
    /// are still at their positions from before the move.
    cube: Cube,
    animation_prefs: AnimationPreferences,

    state: EngineState,
    queue: MoveQueue,
    next_id: u64,

    /// Stack of moves to undo.
    undo_stack: Vec<Move>,
    /// Stack of moves to redo.
    redo_stack: Vec<Move>,
    /// Moves committed to the cube since the last reset.
    history: Vec<Move>,

    subscribers: Vec<mpsc::Sender<MoveEvent>>,
}
impl Default for MoveEngine {
    fn default() -> Self {
        Self::new(CubeGeometry::default(), AnimationPreferences::default())
    }
}
impl MoveEngine {
    /// Constructs an idle engine with a solved cube.
    pub fn new(geometry: CubeGeometry, animation_prefs: AnimationPreferences) -> Self {
        Self {
            cube: Cube::new(geometry),
            animation_prefs,

            state: EngineState::Idle,
            queue: MoveQueue::default(),
            next_id: 0,

            undo_stack: vec![],
            redo_stack: vec![],
            history: vec![],

            subscribers: vec![],
        }
    }
    /// Constructs an idle engine with a solved cube using the given
    /// preferences.
    pub fn from_prefs(prefs: &Preferences) -> Self {
        Self::new(prefs.geometry, prefs.animation.clone())
    }

    /// Returns the cube. Pieces of the animating move, if any, are at their
    /// positions from before the move.
    pub fn cube(&self) -> &Cube {
        &self.cube
    }
    /// Returns the animation preferences.
    pub fn animation_prefs(&self) -> &AnimationPreferences {
        &self.animation_prefs
    }
    /// Sets the animation preferences. The animating move keeps its duration.
    pub fn set_animation_prefs(&mut self, animation_prefs: AnimationPreferences) {
        self.animation_prefs = animation_prefs;
    }

    /// Returns a receiver for [`MoveEvent`]s. Each subscriber gets every
    /// event sent after it subscribed.
    pub fn subscribe(&mut self) -> mpsc::Receiver<MoveEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }
    fn emit(&mut self, event: MoveEvent) {
        // Drop subscribers whose receiver is gone.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    /// Parses a move and adds it to the queue. If no move is animating, the
    /// new move starts animating on the next step.
    pub fn enqueue(&mut self, notation: &str) -> Result<MoveId, EngineError> {
        match notation::parse(notation) {
            Ok(mv) => Ok(self.enqueue_move(mv)),
            Err(e) => {
                log::warn!("Rejected move {notation:?}: {e}");
                Err(e.into())
            }
        }
    }
    /// Parses a whitespace-separated sequence of moves and adds them all to
    /// the queue. If any move is invalid, none are added.
    pub fn enqueue_sequence(&mut self, sequence: &str) -> Result<Vec<MoveId>, EngineError> {
        match notation::parse_sequence(sequence) {
            Ok(moves) => Ok(moves.into_iter().map(|mv| self.enqueue_move(mv)).collect()),
            Err(e) => {
                log::warn!("Rejected move sequence {sequence:?}: {e}");
                Err(e.into())
            }
        }
    }
    /// Adds a move to the queue and the undo history, clearing the redo
    /// history.
    pub fn enqueue_move(&mut self, mv: Move) -> MoveId {
        self.redo_stack.clear();
        self.undo_stack.push(mv);
        self.push_move(mv)
    }
    fn push_move(&mut self, mv: Move) -> MoveId {
        let id = MoveId(self.next_id);
        self.next_id += 1;
        log::debug!("Queued {id}: {mv}");

        let animating = self.is_animating();
        self.queue.push(QueuedMove { id, mv }, animating);
        if !animating {
            self.start_next_move(None);
        }
        id
    }

    /// Returns whether there is a move to undo.
    pub fn has_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }
    /// Returns whether there is a move to redo.
    pub fn has_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
    /// Queues the inverse of the most recently enqueued move. Returns `None`
    /// if there is nothing to undo.
    pub fn undo(&mut self) -> Option<MoveId> {
        let mv = self.undo_stack.pop()?;
        self.redo_stack.push(mv);
        Some(self.push_move(mv.inverse()))
    }
    /// Queues the most recently undone move again. Returns `None` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<MoveId> {
        let mv = self.redo_stack.pop()?;
        self.undo_stack.push(mv);
        Some(self.push_move(mv))
    }

    /// Returns the moves committed to the cube since the last reset, oldest
    /// first. Undos appear as inverse moves.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the current state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }
    /// Returns whether a move is animating.
    pub fn is_animating(&self) -> bool {
        matches!(self.state, EngineState::Animating(_))
    }
    /// Returns the animating move, if any.
    pub fn active_move(&self) -> Option<&ActiveMove> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Animating(active) => Some(active),
        }
    }
    /// Returns the group of pieces that is turning, if any.
    pub fn rotation_group(&self) -> Option<&RotationGroup> {
        Some(&self.active_move()?.group)
    }
    /// Returns the moves waiting behind the animating move, in order.
    pub fn pending_moves(&self) -> Vec<(MoveId, Move)> {
        self.queue.iter().map(|q| (q.id, q.mv)).collect()
    }

    /// Returns the model matrix of each piece, indexed by
    /// [`cubesim_core::PieceId`], including the rotation of the animating
    /// move.
    pub fn piece_transforms(&self) -> Vec<Matrix4<f32>> {
        let group = self.rotation_group();
        self.cube
            .piece_ids()
            .map(|id| {
                let transform = self.cube[id].transform();
                match group {
                    Some(g) if g.contains(id) => g.transform() * transform,
                    _ => transform,
                }
            })
            .collect()
    }

    /// Advances the animation to `now`. Returns whether anything moved, in
    /// which case the cube should be redrawn.
    ///
    /// The animating move's clock starts on the first step after it becomes
    /// active. When it finishes, it is committed to the cube and the next
    /// queued move starts at the same instant.
    ///
    /// If committing a move fails, the cube keeps its state from before the
    /// move, every queued move is cancelled, and the undo and redo histories
    /// are cleared.
    pub fn step(&mut self, now: Instant) -> Result<bool, EngineError> {
        let interpolation = self.animation_prefs.twist_interpolation;
        let EngineState::Animating(active) = &mut self.state else {
            return Ok(false);
        };

        if active.start.is_none() {
            active.start = Some(now);
        }
        let t = active.progress(now);
        if t < 1.0 {
            active.group.angle = active.group.target_angle * interpolation.interpolate(t);
            return Ok(true);
        }

        self.finish_move()?;
        self.start_next_move(Some(now));
        Ok(true)
    }

    /// Commits the animating move and every queued move immediately, with no
    /// animation.
    pub fn catch_up(&mut self) -> Result<(), EngineError> {
        while self.is_animating() {
            self.finish_move()?;
            self.start_next_move(None);
        }
        Ok(())
    }

    /// Cancels every queued and animating move without committing any of
    /// them, then rebuilds the cube in its solved state.
    pub fn reset(&mut self) {
        self.cancel_all();
        self.cube.reset();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.history.clear();
        log::info!("Reset cube");
    }

    /// Replaces the state of the cube with the one described by a facelet
    /// string, bypassing animation. Queued and animating moves are
    /// cancelled.
    ///
    /// If the string is invalid, nothing is changed.
    pub fn set_absolute_state(&mut self, facelets: &str) -> Result<(), EngineError> {
        if let Err(e) = self.cube.set_facelets(facelets) {
            log::warn!("Rejected facelets {facelets:?}: {e}");
            return Err(e.into());
        }
        self.cancel_all();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.history.clear();
        Ok(())
    }

    /// Builds the rotation group for a move and returns it as the active
    /// move. The pieces are selected from the cube as it is now.
    fn animate_move(&self, QueuedMove { id, mv }: QueuedMove) -> ActiveMove {
        let pieces = self.cube.pieces_for_face(mv.face);
        let group = RotationGroup::new(pieces, mv.face.rotation_axis(), target_angle(mv));
        ActiveMove {
            id,
            mv,
            group,
            start: None,
            duration: self.queue.twist_duration(&self.animation_prefs),
        }
    }

    /// Starts the next queued move, if there is one. `start` is the time
    /// that its clock starts, or `None` to start it on the next step.
    fn start_next_move(&mut self, start: Option<Instant>) {
        self.state = match self.queue.pop() {
            Some(queued) => {
                let mut active = self.animate_move(queued);
                active.start = start;
                log::debug!(
                    "Animating {} over {:?} ({} pieces)",
                    active.id,
                    active.duration,
                    active.group.pieces.len(),
                );
                EngineState::Animating(active)
            }
            None => EngineState::Idle,
        };
    }

    /// Commits the animating move at its exact target angle and leaves the
    /// engine idle. Does nothing if no move is animating.
    fn finish_move(&mut self) -> Result<(), EngineError> {
        let EngineState::Animating(active) = std::mem::take(&mut self.state) else {
            return Ok(());
        };
        let ActiveMove { id, mv, group, .. } = active;

        if let Err(e) = self
            .cube
            .commit_rotation(&group.pieces, group.axis, group.target_angle)
        {
            log::error!("Error committing {id} ({mv}): {e}");
            self.emit(MoveEvent::Cancelled { id, mv });
            self.cancel_all();
            // Cancelled moves were never committed, so there is nothing to
            // undo or redo.
            self.undo_stack.clear();
            self.redo_stack.clear();
            return Err(e.into());
        }

        log::debug!("Finished {id}: {mv}");
        self.history.push(mv);
        self.emit(MoveEvent::Completed { id, mv });
        Ok(())
    }

    /// Discards the animating move and every queued move, notifying
    /// subscribers in queue order.
    fn cancel_all(&mut self) {
        let active = match std::mem::take(&mut self.state) {
            EngineState::Idle => None,
            EngineState::Animating(active) => Some(QueuedMove {
                id: active.id,
                mv: active.mv,
            }),
        };
        let cancelled = active.into_iter().chain(self.queue.clear()).collect_vec();
        if !cancelled.is_empty() {
            log::info!("Cancelled {} moves", cancelled.len());
        }
        for QueuedMove { id, mv } in cancelled {
            self.emit(MoveEvent::Cancelled { id, mv });
        }
    }
}
