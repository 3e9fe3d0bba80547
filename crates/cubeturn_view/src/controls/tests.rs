use cgmath::Matrix3;
use cubemath::{Axis, Orientation, QUARTER_TURN, assert_approx_eq};
use cubeprefs::DEFAULT_PREFS;
use cubeturn_core::compile_notation;
use pretty_assertions::assert_eq;

use super::*;
use crate::OrthographicCamera;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

struct Harness {
    model: PuzzleModel,
    controls: Controls,
    camera: OrthographicCamera,
    start: Instant,
}

impl Harness {
    fn new(size: u8) -> Self {
        Self::with_prefs(size, &DEFAULT_PREFS)
    }
    fn with_prefs(size: u8, prefs: &Preferences) -> Self {
        Self {
            model: PuzzleModel::new(size).unwrap(),
            controls: Controls::new(prefs),
            camera: OrthographicCamera::default(),
            start: Instant::now(),
        }
    }

    fn down(&mut self, x: Float, y: Float) -> Result<SessionId, InteractionError> {
        self.controls
            .pointer_down(&self.model, &self.camera, Point2::new(x, y))
    }
    fn drag(
        &mut self,
        session: SessionId,
        x: Float,
        y: Float,
        t: u64,
    ) -> Result<(), InteractionError> {
        self.controls.pointer_move(
            &mut self.model,
            &self.camera,
            session,
            Point2::new(x, y),
            self.start + ms(t),
        )
    }
    fn up(&mut self, session: SessionId, t: u64) -> Result<(), InteractionError> {
        self.controls
            .pointer_up(&mut self.model, session, self.start + ms(t))
    }

    /// Steps until nothing moves.
    fn settle(&mut self) {
        for _ in 0..1000 {
            if !self.controls.step(&mut self.model, ms(50)) {
                return;
            }
        }
        panic!("animation did not settle");
    }

    /// Drags the middle row of the front face right by 0.3 units.
    fn drag_middle_row(&mut self) -> SessionId {
        let s = self.down(0.1, 0.1).unwrap();
        assert_eq!(self.controls.state(), InteractionState::Preparing);
        self.drag(s, 0.2, 0.1, 10).unwrap();
        assert_eq!(self.controls.state(), InteractionState::Rotating);
        self.drag(s, 0.5, 0.1, 20).unwrap();
        assert_approx_eq!(self.controls.flip_angle().unwrap(), 0.3);
        s
    }
}

fn middle_row_turn() -> LayerTurn {
    LayerTurn {
        axis: Axis::Y,
        coordinate: 0,
        quarter_turns: 1,
    }
}

#[test]
fn test_slow_release_reverts() {
    let mut h = Harness::new(3);
    let s = h.drag_middle_row();
    assert!(h.model.active_layer_rotation().is_some());

    // Every movement is older than the momentum window.
    h.up(s, 1000).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Animating);
    h.settle();

    assert_eq!(h.controls.state(), InteractionState::Still);
    assert!(h.controls.take_events().is_empty());
    assert_eq!(h.model.active_layer_rotation(), None);
    assert_eq!(h.model.pieces(), PuzzleModel::new(3).unwrap().pieces());
}

#[test]
fn test_flick_completes_turn() {
    let mut h = Harness::new(3);
    let s = h.drag_middle_row();
    h.up(s, 30).unwrap();
    h.settle();

    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(
        h.controls.take_events(),
        vec![ControlEvent::LayerMove(middle_row_turn())],
    );
    assert!(h.controls.take_events().is_empty());

    let mut expected = PuzzleModel::new(3).unwrap();
    expected
        .apply_move(&Move {
            axis: Axis::Y,
            coordinate: 0,
            angle: QUARTER_TURN,
        })
        .unwrap();
    assert_eq!(h.model.pieces(), expected.pieces());
}

#[test]
fn test_turn_that_solves() {
    let mut h = Harness::new(3);
    h.model
        .apply_move(&Move {
            axis: Axis::Y,
            coordinate: 0,
            angle: -QUARTER_TURN,
        })
        .unwrap();
    assert!(!h.model.is_solved());

    let s = h.drag_middle_row();
    h.up(s, 30).unwrap();
    h.settle();
    assert_eq!(
        h.controls.take_events(),
        vec![
            ControlEvent::LayerMove(middle_row_turn()),
            ControlEvent::Solved,
        ],
    );
    assert!(h.model.is_solved());
}

#[test]
fn test_release_before_threshold() {
    let mut h = Harness::new(3);
    let s = h.down(0.1, 0.1).unwrap();
    h.drag(s, 0.11, 0.1, 10).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Preparing);
    h.up(s, 20).unwrap();

    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(h.controls.active_session(), None);
    assert_eq!(h.model.active_layer_rotation(), None);
    assert!(!h.controls.step(&mut h.model, ms(50)));
    assert!(h.controls.take_events().is_empty());
}

#[test]
fn test_stale_and_busy_sessions() {
    let mut h = Harness::new(3);
    let s = h.down(0.1, 0.1).unwrap();
    assert_eq!(h.down(0.2, 0.2), Err(InteractionError::Busy));
    h.up(s, 10).unwrap();

    assert_eq!(h.drag(s, 0.3, 0.1, 20), Err(InteractionError::StaleSession));
    assert_eq!(h.up(s, 30), Err(InteractionError::StaleSession));
    assert_eq!(h.controls.state(), InteractionState::Still);

    let s2 = h.down(0.1, 0.1).unwrap();
    assert_ne!(s, s2);
    assert_eq!(h.drag(s, 0.3, 0.1, 40), Err(InteractionError::StaleSession));
    assert_eq!(h.controls.active_session(), Some(s2));
}

#[test]
fn test_queued_gesture() {
    let mut h = Harness::new(3);
    let s1 = h.drag_middle_row();
    h.up(s1, 30).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Animating);

    // Start a new gesture on the bottom row while the turn animates.
    let s2 = h.down(-0.1, -0.3).unwrap();
    h.drag(s2, -0.1, -0.25, 40).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Animating);

    h.settle();
    assert_eq!(h.controls.state(), InteractionState::Preparing);
    assert_eq!(
        h.controls.take_events(),
        vec![ControlEvent::LayerMove(middle_row_turn())],
    );

    // Upward drag on the front face turns a column.
    h.drag(s2, -0.1, -0.1, 50).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Rotating);
    let (_, layer) = h.model.active_layer_rotation().unwrap();
    assert_eq!(layer.axis, Axis::X);
    assert_eq!(layer.coordinate, 0);
}

#[test]
fn test_queued_gesture_released_early() {
    let mut h = Harness::new(3);
    let s1 = h.drag_middle_row();
    h.up(s1, 30).unwrap();

    let s2 = h.down(-0.1, -0.3).unwrap();
    h.up(s2, 40).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Animating);

    h.settle();
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(h.controls.active_session(), None);
}

#[test]
fn test_cancel_commit() {
    let mut h = Harness::new(3);
    let s = h.drag_middle_row();
    h.up(s, 30).unwrap();
    assert_eq!(h.controls.pending_commit(), Some(s));

    h.controls.cancel_commit(&mut h.model, s).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(h.controls.pending_commit(), None);
    assert_eq!(h.model.active_layer_rotation(), None);
    assert!(h.controls.take_events().is_empty());
    assert!(!h.controls.step(&mut h.model, ms(50)));
    assert_eq!(
        h.controls.cancel_commit(&mut h.model, s),
        Err(InteractionError::StaleSession),
    );
}

#[test]
fn test_cancel_commit_that_would_solve() {
    let mut h = Harness::new(3);
    h.model
        .apply_move(&Move {
            axis: Axis::Y,
            coordinate: 0,
            angle: -QUARTER_TURN,
        })
        .unwrap();

    let s = h.drag_middle_row();
    h.up(s, 30).unwrap();
    h.controls.cancel_commit(&mut h.model, s).unwrap();

    // The pieces land where the turn was heading, silently.
    assert!(h.model.is_solved());
    assert!(h.controls.take_events().is_empty());
}

#[test]
fn test_reset_mid_animation() {
    let mut h = Harness::new(3);
    let s = h.drag_middle_row();
    h.up(s, 30).unwrap();

    h.controls.reset(&mut h.model);
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(h.model.active_layer_rotation(), None);
    assert!(h.model.is_solved());
    assert!(!h.controls.step(&mut h.model, ms(50)));
}

#[test]
fn test_reset_mid_scramble() {
    let mut h = Harness::new(3);
    let moves = compile_notation(3, "R U F").unwrap();
    h.controls.start_scramble(&mut h.model, moves).unwrap();
    assert!(h.controls.step(&mut h.model, ms(20)));

    h.controls.reset(&mut h.model);
    assert!(!h.controls.is_scrambling());
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert!(h.controls.take_events().is_empty());
    assert!(h.model.is_solved());
    assert!(!h.controls.step(&mut h.model, ms(50)));
}

#[test]
fn test_scramble_playback() {
    let mut h = Harness::new(3);
    let moves = compile_notation(3, "R U F' D2").unwrap();
    h.controls
        .start_scramble(&mut h.model, moves.clone())
        .unwrap();
    assert!(h.controls.is_scrambling());
    assert_eq!(h.controls.state(), InteractionState::Animating);

    assert_eq!(h.down(0.1, 0.1), Err(InteractionError::Busy));
    assert_eq!(
        h.controls.start_scramble(&mut h.model, vec![]),
        Err(InteractionError::Busy),
    );

    h.settle();
    assert!(!h.controls.is_scrambling());
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(
        h.controls.take_events(),
        vec![ControlEvent::ScrambleFinished],
    );

    let mut expected = PuzzleModel::new(3).unwrap();
    expected.apply_moves(&moves).unwrap();
    assert_eq!(h.model.pieces(), expected.pieces());
}

#[test]
fn test_empty_scramble() {
    let mut h = Harness::new(2);
    h.controls.start_scramble(&mut h.model, vec![]).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert_eq!(
        h.controls.take_events(),
        vec![ControlEvent::ScrambleFinished],
    );
}

#[test]
fn test_free_rotation() {
    let mut h = Harness::new(3);
    let identity = h.model.root_rotation();

    // Miss the puzzle and drag horizontally.
    let s = h.down(0.9, 0.9).unwrap();
    h.drag(s, 0.8, 0.9, 10).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Rotating);
    assert_eq!(h.model.active_layer_rotation(), None);
    h.drag(s, 0.6, 0.9, 20).unwrap();
    assert_ne!(h.model.root_rotation(), identity);

    h.up(s, 30).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert!(h.controls.is_spinning());

    let before = h.model.root_rotation();
    assert!(h.controls.step(&mut h.model, ms(16)));
    assert_ne!(h.model.root_rotation(), before);

    h.settle();
    assert!(!h.controls.is_spinning());
    assert!(h.controls.take_events().is_empty());
    assert!(h.model.is_solved());
}

#[test]
fn test_grab_stops_spin() {
    let mut h = Harness::new(3);
    let s = h.down(0.9, 0.9).unwrap();
    h.drag(s, 0.8, 0.9, 10).unwrap();
    h.drag(s, 0.6, 0.9, 20).unwrap();
    h.up(s, 30).unwrap();
    assert!(h.controls.is_spinning());

    h.down(0.9, 0.9).unwrap();
    assert!(!h.controls.is_spinning());
}

#[test]
fn test_fixed_rotation() {
    let mut prefs = DEFAULT_PREFS.clone();
    prefs.interaction.rotation_type = RotationType::Fixed;
    let mut h = Harness::with_prefs(3, &prefs);

    let s = h.down(0.9, 0.9).unwrap();
    h.drag(s, 0.8, 0.9, 10).unwrap();
    h.drag(s, -0.9, 0.9, 20).unwrap();
    // Well past an eighth of a turn, so it rounds to a half turn.
    assert!(h.controls.flip_angle().unwrap() < -2.0);

    h.up(s, 2000).unwrap();
    assert_eq!(h.controls.state(), InteractionState::Animating);
    h.settle();
    assert_eq!(h.controls.state(), InteractionState::Still);
    assert!(h.controls.take_events().is_empty());

    let root = Orientation::from_matrix3_snapped(Matrix3::from(h.model.root_rotation()));
    assert_eq!(root, Some(Orientation::quarter_turn(Axis::Y, 2)));
}

#[test]
fn test_wide_layer_drag() {
    let mut h = Harness::new(4);
    // Second row from the top of the front face.
    let s = h.down(0.1, 0.15).unwrap();
    h.drag(s, 0.2, 0.15, 10).unwrap();
    let (_, layer) = h.model.active_layer_rotation().unwrap();
    assert_eq!(layer.axis, Axis::Y);
    assert_eq!(layer.coordinate, 1);
    assert_eq!(layer.pieces.len(), 16);
    h.up(s, 20).unwrap();
}
