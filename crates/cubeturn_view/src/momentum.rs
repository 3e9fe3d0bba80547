use std::collections::VecDeque;

use cgmath::{Vector2, Zero};
use cubemath::Float;
use web_time::{Duration, Instant};

/// Recent cursor movements, used to tell a flick from a slow drag.
#[derive(Debug, Clone)]
pub struct MomentumBuffer {
    window: Duration,
    points: VecDeque<(Vector2<Float>, Instant)>,
}

impl MomentumBuffer {
    /// Constructs an empty buffer that forgets movements older than `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            points: VecDeque::new(),
        }
    }

    /// Records a cursor movement.
    pub fn push(&mut self, delta: Vector2<Float>, now: Instant) {
        self.prune(now);
        self.points.push_back((delta, now));
    }

    /// Returns the momentum of recent movements. Later movements are weighted
    /// more heavily than earlier ones.
    pub fn momentum(&mut self, now: Instant) -> Vector2<Float> {
        self.prune(now);
        let len = self.points.len() as Float;
        self.points
            .iter()
            .enumerate()
            .map(|(i, &(delta, _))| delta * (i as Float / len))
            .fold(Vector2::zero(), |a, b| a + b)
    }

    /// Returns the number of movements in the window, as of the last update.
    pub fn len(&self) -> usize {
        self.points.len()
    }
    /// Returns whether there are no movements in the window, as of the last
    /// update.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn prune(&mut self, now: Instant) {
        while let Some(&(_, time)) = self.points.front() {
            if now.duration_since(time) < self.window {
                break;
            }
            self.points.pop_front();
        }
    }
}
