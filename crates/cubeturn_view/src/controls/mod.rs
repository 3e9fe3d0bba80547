//! Interaction state machine.

use std::collections::VecDeque;

use cgmath::{InnerSpace, Point2, Vector2, Vector3};
use cubemath::{Float, QUARTER_TURN, Sign, round_angle};
use cubeprefs::{AnimationPreferences, InteractionPreferences, Preferences, RotationType};
use cubeturn_core::{LayerGroupHandle, LayerTurn, Move, PivotError, PuzzleModel};
use web_time::{Duration, Instant};

use crate::resolver::{resolve_layer_drag, resolve_puzzle_drag};
use crate::{DragPlane, InteractionError, MomentumBuffer, PuzzleGeometry, PuzzleHit, Tween};

#[cfg(test)]
mod tests;

/// Phase of the current interaction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InteractionState {
    /// Nothing is happening.
    #[default]
    Still,
    /// The pointer is down but has not moved far enough to pick an axis.
    Preparing,
    /// The pointer is turning a layer or the whole puzzle.
    Rotating,
    /// A turn is animating to its final angle, or a scramble is playing.
    Animating,
}

/// Identifier for a single gesture or scripted turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

/// Notification produced by [`Controls`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ControlEvent {
    /// The user turned a layer.
    LayerMove(LayerTurn),
    /// The puzzle is solved after a turn made by the user.
    Solved,
    /// Scramble playback ended.
    ScrambleFinished,
}

#[derive(Debug, Clone)]
struct Gesture {
    session: SessionId,
    target: GestureTarget,
    plane: DragPlane,
    /// Latest cursor position, in normalized device coordinates.
    cursor: Point2<Float>,
    /// Latest cursor position on the drag plane.
    drag_current: Point2<Float>,
    drag_total: Vector2<Float>,
    momentum: MomentumBuffer,
    rotation: Option<ActiveRotation>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum GestureTarget {
    Layer(PuzzleHit),
    Puzzle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct ActiveRotation {
    turning: Turning,
    /// Which drag plane coordinate drives the rotation.
    tracking: usize,
    /// Radians of rotation per unit of drag.
    speed: Float,
    release: Release,
    /// Total rotation applied by the gesture so far.
    flip_angle: Float,
}

/// What happens to a rotation when the pointer is released.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Release {
    /// Animate to a multiple of a quarter turn.
    Quantize,
    /// Keep spinning and slow down gradually.
    Spin,
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Turning {
    /// Layer rotation around a signed axis in the frame of the puzzle.
    Layer {
        handle: LayerGroupHandle,
        axis: Vector3<Float>,
    },
    /// Whole-puzzle rotation around a signed axis in world space.
    Puzzle { axis: Vector3<Float> },
}
impl Turning {
    fn rotate(self, model: &mut PuzzleModel, angle: Float) -> Result<(), PivotError> {
        match self {
            Turning::Layer { handle, axis } => model.apply_rotation(handle, axis, angle),
            Turning::Puzzle { axis } => {
                model.rotate_root(axis, angle);
                Ok(())
            }
        }
    }
}

/// Animation that ends in a commit.
#[derive(Debug, Clone)]
struct CommitTask {
    session: SessionId,
    turning: Turning,
    /// Total rotation to animate.
    rotation: Float,
    tween: Tween,
    scramble: bool,
}

#[derive(Debug, Copy, Clone)]
struct Spin {
    axis: Vector3<Float>,
    /// Radians per tick.
    velocity: Float,
}

/// Turns pointer events into rotations of a puzzle.
///
/// Every method that changes the puzzle takes it by reference, so the caller
/// keeps ownership of the [`PuzzleModel`]. Pointer events carry a
/// [`SessionId`] returned from [`Controls::pointer_down()`]; events for a
/// gesture that already ended are rejected with
/// [`InteractionError::StaleSession`] and change nothing.
#[derive(Debug, Clone)]
pub struct Controls {
    interaction: InteractionPreferences,
    animation: AnimationPreferences,

    state: InteractionState,
    gesture: Option<Gesture>,
    /// Whether a gesture began while a turn was animating.
    getting_drag: bool,
    commit: Option<CommitTask>,
    scramble: Option<VecDeque<Move>>,
    spin: Option<Spin>,

    next_session: u64,
    events: Vec<ControlEvent>,
}

impl Controls {
    /// Constructs a controller with no gesture in progress.
    pub fn new(prefs: &Preferences) -> Self {
        Self {
            interaction: prefs.interaction.clone(),
            animation: prefs.animation.clone(),

            state: InteractionState::Still,
            gesture: None,
            getting_drag: false,
            commit: None,
            scramble: None,
            spin: None,

            next_session: 0,
            events: vec![],
        }
    }

    /// Returns the current phase of interaction.
    pub fn state(&self) -> InteractionState {
        self.state
    }
    /// Returns the session of the gesture in progress, if there is one.
    pub fn active_session(&self) -> Option<SessionId> {
        self.gesture.as_ref().map(|g| g.session)
    }
    /// Returns the session of the turn that is animating toward a commit, if
    /// there is one.
    pub fn pending_commit(&self) -> Option<SessionId> {
        self.commit.as_ref().map(|c| c.session)
    }
    /// Returns whether a scramble is playing.
    pub fn is_scrambling(&self) -> bool {
        self.scramble.is_some()
    }
    /// Returns whether the puzzle is still spinning after a free rotation.
    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }
    /// Returns the angle that the current gesture has rotated so far, if it
    /// has begun rotating.
    pub fn flip_angle(&self) -> Option<Float> {
        Some(self.gesture.as_ref()?.rotation?.flip_angle)
    }

    /// Removes and returns all events since the last call.
    pub fn take_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begins a gesture at `cursor`.
    ///
    /// If a turn is animating, the gesture is queued and starts once the turn
    /// is committed.
    pub fn pointer_down(
        &mut self,
        model: &PuzzleModel,
        geometry: &impl PuzzleGeometry,
        cursor: Point2<Float>,
    ) -> Result<SessionId, InteractionError> {
        if self.scramble.is_some() || self.gesture.is_some() {
            return Err(InteractionError::Busy);
        }

        let (target, plane) = match geometry.hit_test(model, cursor) {
            Some(hit) => (
                GestureTarget::Layer(hit),
                DragPlane::facing(hit.world_normal),
            ),
            None => (GestureTarget::Puzzle, DragPlane::whole_puzzle()),
        };
        let drag_current = geometry
            .cursor_ray(cursor)
            .and_then(|ray| plane.intersect(ray))
            .ok_or(InteractionError::MissedDragPlane)?;

        // Grabbing the puzzle stops it from spinning.
        self.spin = None;

        let session = self.new_session();
        log::trace!("gesture {session:?} began on {target:?}");
        self.getting_drag = self.state == InteractionState::Animating;
        self.gesture = Some(Gesture {
            session,
            target,
            plane,
            cursor,
            drag_current,
            drag_total: Vector2::new(0.0, 0.0),
            momentum: MomentumBuffer::new(self.momentum_window()),
            rotation: None,
        });
        if self.state == InteractionState::Still {
            self.set_state(InteractionState::Preparing);
        }
        Ok(session)
    }

    /// Moves the cursor of a gesture.
    ///
    /// Once the cursor has moved far enough, this picks the rotation axis and
    /// begins rotating. The movement that crosses the threshold only picks
    /// the axis; movements after it rotate.
    pub fn pointer_move(
        &mut self,
        model: &mut PuzzleModel,
        geometry: &impl PuzzleGeometry,
        session: SessionId,
        cursor: Point2<Float>,
        now: Instant,
    ) -> Result<(), InteractionError> {
        if self.scramble.is_some() {
            return Err(InteractionError::Busy);
        }
        let Some(gesture) = self.gesture.as_mut().filter(|g| g.session == session) else {
            return Err(InteractionError::StaleSession);
        };

        let point = geometry
            .cursor_ray(cursor)
            .and_then(|ray| gesture.plane.intersect(ray))
            .ok_or(InteractionError::MissedDragPlane)?;
        let delta = point - gesture.drag_current;
        gesture.cursor = cursor;
        gesture.drag_current = point;
        gesture.drag_total += delta;
        gesture.momentum.push(delta, now);

        match self.state {
            InteractionState::Preparing => {
                if gesture.drag_total.magnitude() <= self.interaction.drag_threshold as Float {
                    return Ok(());
                }
                match begin_rotation(model, gesture, &self.interaction) {
                    Ok(rotation) => {
                        log::trace!("gesture {session:?} rotating {:?}", rotation.turning);
                        gesture.rotation = Some(rotation);
                        self.set_state(InteractionState::Rotating);
                    }
                    Err(e) => {
                        log::warn!("gesture {session:?} cannot rotate: {e}");
                        self.gesture = None;
                        self.set_state(InteractionState::Still);
                        return Err(e.into());
                    }
                }
            }

            InteractionState::Rotating => {
                if let Some(rotation) = &mut gesture.rotation {
                    let angle = delta[rotation.tracking] * rotation.speed;
                    if let Err(e) = rotation.turning.rotate(model, angle) {
                        cubemath::debug_panic!("gesture {session:?} lost its rotation: {e}");
                        self.gesture = None;
                        self.set_state(InteractionState::Still);
                        return Err(e.into());
                    }
                    rotation.flip_angle += angle;
                }
            }

            // Queued gestures only accumulate movement.
            InteractionState::Still | InteractionState::Animating => (),
        }
        Ok(())
    }

    /// Ends a gesture.
    ///
    /// A layer turn is animated to the nearest quarter turn, or to the next
    /// one in the direction of the drag if the release was a flick. Releasing
    /// before the pointer moved far enough does nothing.
    pub fn pointer_up(
        &mut self,
        model: &mut PuzzleModel,
        session: SessionId,
        now: Instant,
    ) -> Result<(), InteractionError> {
        if self.scramble.is_some() {
            return Err(InteractionError::Busy);
        }
        let Some(mut gesture) = self.gesture.take_if(|g| g.session == session) else {
            return Err(InteractionError::StaleSession);
        };

        match (self.state, gesture.rotation) {
            (InteractionState::Rotating, Some(rotation)) => {
                let momentum = gesture.momentum.momentum(now)[rotation.tracking];
                self.release(model, session, rotation, momentum);
            }
            (InteractionState::Animating, _) => {
                log::trace!("dropped queued gesture {session:?}");
                self.getting_drag = false;
            }
            _ => {
                log::trace!("gesture {session:?} ended without rotating");
                self.set_state(InteractionState::Still);
            }
        }
        Ok(())
    }

    fn release(
        &mut self,
        model: &mut PuzzleModel,
        session: SessionId,
        rotation: ActiveRotation,
        momentum: Float,
    ) {
        match rotation.release {
            Release::Spin => {
                let velocity = momentum * rotation.speed;
                if let Turning::Puzzle { axis } = rotation.turning
                    && velocity.abs() > self.interaction.free_rotation_min_speed as Float
                {
                    self.spin = Some(Spin { axis, velocity });
                }
                self.set_state(InteractionState::Still);
            }

            Release::Quantize => {
                let flip_angle = rotation.flip_angle;
                let is_flick = momentum.abs() > self.interaction.flick_momentum_threshold as Float
                    && flip_angle.abs() < QUARTER_TURN;
                let target = match is_flick {
                    true => round_angle(
                        flip_angle + Sign::of_float(flip_angle).float() * QUARTER_TURN / 2.0,
                    ),
                    false => round_angle(flip_angle),
                };
                log::trace!(
                    "gesture {session:?} released at {flip_angle} with momentum {momentum}; \
                     animating to {target}",
                );

                let flip = self.animation.current_flip();
                let tween = match rotation.turning {
                    Turning::Layer { .. } => Tween::from_secs(flip.layer_easing, flip.layer_duration),
                    Turning::Puzzle { .. } => {
                        Tween::from_secs(flip.puzzle_easing, flip.puzzle_duration)
                    }
                };
                self.commit = Some(CommitTask {
                    session,
                    turning: rotation.turning,
                    rotation: target - flip_angle,
                    tween,
                    scramble: false,
                });
                self.set_state(InteractionState::Animating);

                if self.commit.as_ref().is_some_and(|c| c.tween.is_done())
                    && let Err(e) = self.skip_animation(model, true)
                {
                    cubemath::debug_panic!("gesture {session:?} lost its rotation: {e}");
                }
            }
        }
    }

    /// Advances animations by `delta`. Returns whether anything moved.
    pub fn step(&mut self, model: &mut PuzzleModel, delta: Duration) -> bool {
        let mut changed = false;

        if let Some(spin) = &mut self.spin {
            model.rotate_root(spin.axis, spin.velocity);
            spin.velocity *= 1.0 - self.interaction.free_rotation_damping as Float;
            if spin.velocity.abs() < self.interaction.free_rotation_min_speed as Float {
                self.spin = None;
            }
            changed = true;
        }

        if let Some(task) = &mut self.commit {
            let progress = task.tween.advance(delta);
            if let Err(e) = task.turning.rotate(model, task.rotation * progress as Float) {
                cubemath::debug_panic!("animation {:?} lost its rotation: {e}", task.session);
            }
            changed = true;
            if task.tween.is_done() {
                self.finish_commit(model, true);
            }
        }

        changed
    }

    /// Cancels the animation for a turn. The pieces snap to where the turn was
    /// heading, but no events are raised for it.
    pub fn cancel_commit(
        &mut self,
        model: &mut PuzzleModel,
        session: SessionId,
    ) -> Result<(), InteractionError> {
        if self.pending_commit() != Some(session) {
            return Err(InteractionError::StaleSession);
        }
        log::trace!("canceling animation {session:?}");
        self.skip_animation(model, false)?;
        Ok(())
    }

    /// Jumps to the end of the animation and commits it. `notify` is whether
    /// to raise events for the committed turn.
    fn skip_animation(&mut self, model: &mut PuzzleModel, notify: bool) -> Result<(), PivotError> {
        if let Some(task) = &mut self.commit {
            let progress = task.tween.finish();
            task.turning
                .rotate(model, task.rotation * progress as Float)?;
        }
        self.finish_commit(model, notify);
        Ok(())
    }

    fn finish_commit(&mut self, model: &mut PuzzleModel, notify: bool) {
        let Some(task) = self.commit.take() else {
            return;
        };

        match task.turning {
            Turning::Layer { handle, .. } => match model.commit_layer_rotation(handle) {
                Ok(turn) => {
                    if notify && !task.scramble && !turn.is_identity() {
                        self.events.push(ControlEvent::LayerMove(turn));
                        if model.is_solved() {
                            log::debug!("puzzle solved");
                            self.events.push(ControlEvent::Solved);
                        }
                    }
                }
                Err(e) => {
                    cubemath::debug_panic!("cannot commit animation {:?}: {e}", task.session);
                }
            },
            Turning::Puzzle { .. } => {
                if !model.snap_root_rotation() {
                    log::warn!("puzzle rotation did not end on a quarter turn");
                }
            }
        }

        if task.scramble {
            if let Err(e) = self.continue_scramble(model) {
                log::warn!("aborting scramble: {e}");
                self.scramble = None;
                self.set_state(InteractionState::Still);
            }
        } else if std::mem::take(&mut self.getting_drag) && self.gesture.is_some() {
            self.set_state(InteractionState::Preparing);
        } else {
            self.set_state(InteractionState::Still);
        }
    }

    /// Plays back a sequence of moves with the swift animation. Pointer
    /// events are rejected until it finishes.
    pub fn start_scramble(
        &mut self,
        model: &mut PuzzleModel,
        moves: impl IntoIterator<Item = Move>,
    ) -> Result<(), InteractionError> {
        if self.state != InteractionState::Still
            || self.gesture.is_some()
            || self.commit.is_some()
            || self.scramble.is_some()
        {
            return Err(InteractionError::Busy);
        }
        let moves: VecDeque<Move> = moves.into_iter().collect();
        log::debug!("playing scramble of {} moves", moves.len());
        self.spin = None;
        self.scramble = Some(moves);
        if let Err(e) = self.continue_scramble(model) {
            self.scramble = None;
            self.set_state(InteractionState::Still);
            return Err(e.into());
        }
        Ok(())
    }

    fn continue_scramble(&mut self, model: &mut PuzzleModel) -> Result<(), PivotError> {
        let Some(mv) = self.scramble.as_mut().and_then(|moves| moves.pop_front()) else {
            self.scramble = None;
            self.events.push(ControlEvent::ScrambleFinished);
            self.set_state(InteractionState::Still);
            return Ok(());
        };

        let layer = model.layer_of(mv.axis, mv.coordinate)?;
        let handle = model.begin_layer_rotation(&layer)?;
        let flip = self.animation.scramble_flip();
        let tween = Tween::from_secs(flip.layer_easing, flip.layer_duration);
        let session = self.new_session();
        self.commit = Some(CommitTask {
            session,
            turning: Turning::Layer {
                handle,
                axis: mv.axis.unit_vec3(),
            },
            rotation: mv.angle,
            tween,
            scramble: true,
        });
        self.set_state(InteractionState::Animating);
        Ok(())
    }

    /// Stops everything and resets the puzzle to its solved state.
    ///
    /// Any animating turn is canceled first. No events are raised.
    pub fn reset(&mut self, model: &mut PuzzleModel) {
        self.scramble = None;
        if let Some(task) = &mut self.commit {
            task.scramble = false;
        }
        if let Some(session) = self.pending_commit()
            && let Err(e) = self.cancel_commit(model, session)
        {
            log::warn!("error finishing animation before reset: {e}");
        }
        if let Some(gesture) = self.gesture.take()
            && let Some(ActiveRotation {
                turning: Turning::Layer { handle, .. },
                ..
            }) = gesture.rotation
            && let Err(e) = model.cancel_layer_rotation(handle)
        {
            log::warn!("error canceling gesture before reset: {e}");
        }
        self.spin = None;
        self.getting_drag = false;
        self.set_state(InteractionState::Still);
        model.reset();
    }

    fn momentum_window(&self) -> Duration {
        Duration::try_from_secs_f32(self.interaction.momentum_window).unwrap_or_default()
    }

    fn new_session(&mut self) -> SessionId {
        let session = SessionId(self.next_session);
        self.next_session += 1;
        session
    }

    fn set_state(&mut self, state: InteractionState) {
        if self.state != state {
            log::trace!("{:?} -> {state:?}", self.state);
            self.state = state;
        }
    }
}

/// Picks the rotation axis for a gesture and, for a layer, hands the layer to
/// a new pivot.
fn begin_rotation(
    model: &mut PuzzleModel,
    gesture: &Gesture,
    prefs: &InteractionPreferences,
) -> Result<ActiveRotation, PivotError> {
    match gesture.target {
        GestureTarget::Layer(hit) => {
            let resolved = resolve_layer_drag(
                &gesture.plane,
                model.root_rotation(),
                hit.local_normal,
                gesture.drag_total,
            );
            let layer = model.layer_containing(hit.piece, resolved.layer_axis)?;
            let handle = model.begin_layer_rotation(&layer)?;
            Ok(ActiveRotation {
                turning: Turning::Layer {
                    handle,
                    axis: resolved.flip_axis,
                },
                tracking: resolved.tracking,
                speed: 1.0,
                release: Release::Quantize,
                flip_angle: 0.0,
            })
        }

        GestureTarget::Puzzle => {
            let resolved = resolve_puzzle_drag(gesture.drag_total, gesture.cursor);
            let (speed, release) = match prefs.rotation_type {
                RotationType::Free => (prefs.free_rotation_speed as Float, Release::Spin),
                RotationType::Fixed => (1.0, Release::Quantize),
            };
            Ok(ActiveRotation {
                turning: Turning::Puzzle {
                    axis: resolved.flip_axis,
                },
                tracking: resolved.tracking,
                speed,
                release,
                flip_angle: 0.0,
            })
        }
    }
}
