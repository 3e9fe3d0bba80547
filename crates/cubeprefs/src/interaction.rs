use eyre::{Result, ensure};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::ensure_non_negative;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Distance, in world units on the drag plane, that the cursor must move
    /// before a drag turns anything.
    pub drag_threshold: f32,
    /// Minimum release momentum that carries a layer turn on to the next
    /// quarter turn.
    pub flick_momentum_threshold: f32,
    /// How long pointer movements count toward momentum, in seconds.
    pub momentum_window: f32,

    pub rotation_type: RotationType,
    pub free_rotation_speed: f32,
    /// Fraction of the free rotation velocity lost each tick.
    pub free_rotation_damping: f32,
    pub free_rotation_min_speed: f32,
}

impl InteractionPreferences {
    pub(crate) fn validate(&self) -> Result<()> {
        ensure_non_negative("drag_threshold", self.drag_threshold)?;
        ensure_non_negative("flick_momentum_threshold", self.flick_momentum_threshold)?;
        ensure_non_negative("momentum_window", self.momentum_window)?;
        ensure_non_negative("free_rotation_speed", self.free_rotation_speed)?;
        ensure_non_negative("free_rotation_min_speed", self.free_rotation_min_speed)?;
        ensure!(
            (0.0..=1.0).contains(&self.free_rotation_damping),
            "free_rotation_damping must be between 0 and 1, got {}",
            self.free_rotation_damping,
        );
        Ok(())
    }
}

/// How dragging the background rotates the whole puzzle.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RotationType {
    /// Rotate continuously and keep spinning with momentum after release.
    #[default]
    Free,
    /// Rotate by quarter turns about the axis of the drag.
    Fixed,
}
