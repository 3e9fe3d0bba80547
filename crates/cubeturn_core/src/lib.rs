//! Puzzle model, move compiler, and scrambler for N×N×N cube puzzles.
//!
//! [`PuzzleModel`] owns every piece of the puzzle. Layer turns go through a
//! temporary pivot: [`PuzzleModel::begin_layer_rotation()`] hands the pieces of
//! a layer to the pivot, [`PuzzleModel::apply_rotation()`] turns it, and
//! [`PuzzleModel::commit_layer_rotation()`] snaps the turn to a multiple of a
//! quarter turn and hands the pieces back.

mod errors;
mod model;
mod moves;
mod presets;
mod scramble;
mod snapshot;
mod solved;
#[cfg(test)]
mod tests;

pub use cubeturn_notation as notation;
pub use errors::*;
pub use model::*;
pub use moves::*;
pub use presets::Preset;
pub use scramble::*;
pub use snapshot::PuzzleSnapshot;
pub use solved::*;

/// Smallest supported puzzle size.
pub const MIN_SIZE: u8 = 2;
/// Largest supported puzzle size.
pub const MAX_SIZE: u8 = 5;

/// Returns an error if `size` is not a supported puzzle size.
pub fn check_size(size: u8) -> Result<(), UnsupportedSize> {
    match (MIN_SIZE..=MAX_SIZE).contains(&size) {
        true => Ok(()),
        false => Err(UnsupportedSize(size)),
    }
}
