use cubeprefs::Easing;
use web_time::Duration;

/// Eased progression from 0 to 1 over a fixed duration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tween {
    easing: Easing,
    duration: Duration,
    elapsed: Duration,
    value: f32,
}

impl Tween {
    /// Constructs a tween that has not started yet.
    pub fn new(easing: Easing, duration: Duration) -> Self {
        Self {
            easing,
            duration,
            elapsed: Duration::ZERO,
            value: 0.0,
        }
    }
    /// Constructs a tween with a duration in seconds. Negative or non-finite
    /// durations complete immediately.
    pub fn from_secs(easing: Easing, secs: f32) -> Self {
        Self::new(easing, Duration::try_from_secs_f32(secs).unwrap_or_default())
    }

    /// Returns the current eased value.
    pub fn value(&self) -> f32 {
        self.value
    }
    /// Returns whether the tween has reached its end.
    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the tween by `delta` and returns how much the eased value
    /// changed. The final value is exactly 1.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.elapsed = (self.elapsed + delta).min(self.duration);
        let new_value = match self.is_done() {
            true => 1.0,
            false => self
                .easing
                .interpolate(self.elapsed.as_secs_f32() / self.duration.as_secs_f32()),
        };
        let change = new_value - self.value;
        self.value = new_value;
        change
    }

    /// Jumps to the end of the tween and returns how much the eased value
    /// changed.
    pub fn finish(&mut self) -> f32 {
        self.advance(self.duration)
    }
}
