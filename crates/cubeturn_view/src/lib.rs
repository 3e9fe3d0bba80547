//! Drag interaction for cube puzzles.
//!
//! [`Controls`] turns pointer events into layer turns and whole-puzzle
//! rotations of a [`PuzzleModel`](cubeturn_core::PuzzleModel). Hit testing is
//! delegated to a [`PuzzleGeometry`], which is normally backed by whatever
//! renders the puzzle. [`OrthographicCamera`] is a simple implementation that
//! needs no renderer.

mod controls;
mod errors;
mod geometry;
mod momentum;
mod plane;
pub mod resolver;
mod tween;

pub use controls::*;
pub use errors::InteractionError;
pub use geometry::*;
pub use momentum::MomentumBuffer;
pub use plane::DragPlane;
pub use tween::Tween;
