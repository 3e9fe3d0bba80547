//! Quarter-turn angle quantization.

use std::f64::consts::FRAC_PI_2;

use crate::Float;

/// Angle of a quarter turn, in radians.
pub const QUARTER_TURN: Float = FRAC_PI_2;

/// Rounds an angle to the nearest multiple of a quarter turn. Halfway angles
/// round away from zero.
pub fn round_angle(angle: Float) -> Float {
    angle.signum() * (angle.abs() / QUARTER_TURN).round() * QUARTER_TURN
}

/// Returns the number of quarter turns nearest to `angle`.
pub fn quarter_turns(angle: Float) -> i32 {
    (round_angle(angle) / QUARTER_TURN).round() as i32
}

/// Snaps one Euler angle component to the nearest multiple of a quarter turn.
pub fn snap_angle(angle: Float) -> Float {
    (angle / QUARTER_TURN).round() * QUARTER_TURN
}

/// Snaps each component of an Euler rotation to the nearest multiple of a
/// quarter turn.
pub fn snap_euler(euler: [Float; 3]) -> [Float; 3] {
    euler.map(snap_angle)
}
