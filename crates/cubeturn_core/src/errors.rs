use cubemath::Axis;
use cubeturn_notation::NotationError;
use thiserror::Error;

/// Error produced when a puzzle size is out of range.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("unsupported puzzle size {0} (must be 2 to 5)")]
pub struct UnsupportedSize(pub u8);

/// Error produced when a layer query selects no pieces.
///
/// This indicates a broken invariant in layer coordinates rather than bad user
/// input.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[error("no pieces in layer {coordinate} along {axis} axis")]
pub struct SelectionError {
    /// Axis of the layer.
    pub axis: Axis,
    /// Rounded coordinate of the layer along the axis.
    pub coordinate: i32,
}

/// Error produced by a layer rotation.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PivotError {
    /// The layer is empty.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// Another layer rotation has not been committed yet.
    #[error("another layer is already rotating")]
    Busy,
    /// The handle refers to a layer rotation that was already committed or
    /// canceled.
    #[error("stale layer rotation handle")]
    StaleHandle,
    /// The rotation axis is not the axis of the layer.
    #[error("cannot rotate {layer_axis} layer around {rotation_axis} axis")]
    AxisMismatch {
        /// Axis of the layer.
        layer_axis: Axis,
        /// Requested rotation axis.
        rotation_axis: Axis,
    },
    /// The rotation axis is not a signed unit vector along a coordinate axis.
    #[error("rotation axis is not aligned to a coordinate axis")]
    NotAxisAligned,
}

/// Error produced when compiling move notation for a specific puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompileError {
    /// The text is not valid notation.
    #[error(transparent)]
    Notation(#[from] NotationError),
    /// The puzzle size is out of range.
    #[error(transparent)]
    UnsupportedSize(#[from] UnsupportedSize),
    /// Second-layer moves need at least four layers.
    #[error("move {token:?} needs a puzzle with at least 4 layers (size is {size})")]
    WideMoveUnsupported {
        /// Text of the offending move.
        token: String,
        /// Size of the puzzle.
        size: u8,
    },
}

/// Error produced when generating a scramble.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScrambleError {
    /// The puzzle size is out of range.
    #[error(transparent)]
    UnsupportedSize(#[from] UnsupportedSize),
    /// Difficulty must be 0, 1, or 2.
    #[error("invalid scramble difficulty {0} (must be 0 to 2)")]
    InvalidDifficulty(u8),
}

/// Error produced when importing a puzzle snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotError {
    /// The puzzle size is out of range.
    #[error(transparent)]
    UnsupportedSize(#[from] UnsupportedSize),
    /// A per-piece list has the wrong length.
    #[error("expected {expected} entries in {field}, got {got}")]
    WrongLength {
        /// Name of the list.
        field: &'static str,
        /// Number of pieces in the puzzle.
        expected: usize,
        /// Number of entries in the list.
        got: usize,
    },
    /// The piece identities are not a permutation of the piece indices.
    #[error("piece identities are not a permutation")]
    NotAPermutation,
    /// A rotation does not snap to a rotation of the cube.
    #[error("invalid rotation for slot {slot}")]
    InvalidRotation {
        /// Index of the slot.
        slot: usize,
    },
}
