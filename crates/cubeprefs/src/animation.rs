use std::f32::consts::PI;

use eyre::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::ensure_non_negative;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Which flip animation to use for turns made by the user.
    pub flip_type: FlipType,

    pub swift: FlipAnimation,
    pub smooth: FlipAnimation,
    pub bounce: FlipAnimation,
}

impl AnimationPreferences {
    /// Returns the animation for a flip type.
    pub fn flip(&self, flip_type: FlipType) -> &FlipAnimation {
        match flip_type {
            FlipType::Swift => &self.swift,
            FlipType::Smooth => &self.smooth,
            FlipType::Bounce => &self.bounce,
        }
    }

    /// Returns the animation selected by the user.
    pub fn current_flip(&self) -> &FlipAnimation {
        self.flip(self.flip_type)
    }

    /// Returns the animation used while playing back a scramble.
    pub fn scramble_flip(&self) -> &FlipAnimation {
        &self.swift
    }

    pub(crate) fn validate(&self) -> Result<()> {
        for (name, flip) in [
            ("swift", &self.swift),
            ("smooth", &self.smooth),
            ("bounce", &self.bounce),
        ] {
            ensure_non_negative(&format!("{name}.layer_duration"), flip.layer_duration)?;
            ensure_non_negative(&format!("{name}.puzzle_duration"), flip.puzzle_duration)?;
        }
        Ok(())
    }
}

/// Named set of animation parameters.
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
pub enum FlipType {
    #[default]
    Swift,
    Smooth,
    Bounce,
}

/// Durations and easings for layer turns and whole-puzzle turns.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
#[serde(default)]
pub struct FlipAnimation {
    /// Duration of a layer turn, in seconds.
    pub layer_duration: f32,
    pub layer_easing: Easing,
    /// Duration of a whole-puzzle turn, in seconds.
    pub puzzle_duration: f32,
    pub puzzle_easing: Easing,
}

/// Function that maps a float from the range 0.0 to 1.0 to another float,
/// with 0.0 mapping to 0.0 and 1.0 mapping to 1.0.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    Lerp,
    #[default]
    Cosine,
    /// Decelerating polynomial. The power is rounded to an integer.
    PowerOut { power: f32 },
    /// Decelerating quarter sine wave.
    SineOut,
    /// Overshoots the target and then settles back onto it.
    BackOut { overshoot: f32 },
}

impl Easing {
    /// Returns the eased value for `t` in the range [0, 1].
    pub fn interpolate(self, t: f32) -> f32 {
        match self {
            Self::Lerp => t,

            Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,

            Self::PowerOut { power } => 1.0 - (t - 1.0).powi(power.round() as i32).abs(),

            Self::SineOut => (t * PI / 2.0).sin(),

            Self::BackOut { overshoot: s } => {
                let t = t - 1.0;
                t * t * ((s + 1.0) * t + s) + 1.0
            }
        }
    }
}
