//! User preferences.
//!
//! Defaults are bundled in `default.yaml`. A user file in the same format may
//! override any subset of them.

#![allow(missing_docs)] // too many things to document

use std::path::Path;

use eyre::{Context, Result, ensure};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
#[cfg(test)]
mod tests;

pub use animation::*;
pub use interaction::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub puzzle: PuzzlePreferences,
    pub scramble: ScramblePreferences,
    pub animation: AnimationPreferences,
    pub interaction: InteractionPreferences,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PuzzlePreferences {
    /// Number of layers along each axis.
    pub size: u8,
}
impl Default for PuzzlePreferences {
    fn default() -> Self {
        Self { size: 3 }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Scramble difficulty, from 0 to 2.
    pub difficulty: u8,
}

impl Preferences {
    /// Loads preferences from the bundled defaults, overridden by `user_file`
    /// if it is given. If loading fails, then the default preferences are
    /// returned.
    pub fn load(user_file: Option<&Path>) -> Self {
        Self::try_load(user_file).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e:#}");
            DEFAULT_PREFS.clone()
        })
    }

    /// Loads preferences from the bundled defaults, overridden by `user_file`
    /// if it is given.
    pub fn try_load(user_file: Option<&Path>) -> Result<Self> {
        lazy_static::initialize(&DEFAULT_PREFS);

        // Load default preferences.
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        // Load user preferences.
        if let Some(path) = user_file {
            config = config.add_source(config::File::from(path).format(PREFS_FILE_FORMAT));
        }

        let prefs: Self = config
            .build()
            .and_then(|c| c.try_deserialize())
            .wrap_err("error reading preferences")?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Returns an error if any preference is out of range.
    pub fn validate(&self) -> Result<()> {
        cubeturn_core::scramble_count(self.puzzle.size, self.scramble.difficulty)
            .wrap_err("invalid puzzle or scramble preferences")?;
        self.animation.validate()?;
        self.interaction.validate()?;
        Ok(())
    }

    /// Serializes the preferences as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_norway::to_string(self).wrap_err("error serializing preferences")
    }
}

fn ensure_non_negative(name: &str, value: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{name} must be a non-negative number, got {value}",
    );
    Ok(())
}
