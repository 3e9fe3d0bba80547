use cubeturn_core::PivotError;
use thiserror::Error;

/// Error produced by a pointer event or a scripted animation.
///
/// None of these leave the puzzle in a partially rotated state.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InteractionError {
    /// The event refers to a gesture that already ended.
    #[error("no gesture with this session is in progress")]
    StaleSession,
    /// Another gesture or a scramble is in progress.
    #[error("another gesture or a scramble is in progress")]
    Busy,
    /// The cursor ray is parallel to the drag plane.
    #[error("cursor does not reach the drag plane")]
    MissedDragPlane,
    /// The puzzle rejected a layer rotation.
    #[error(transparent)]
    Pivot(#[from] PivotError),
}
