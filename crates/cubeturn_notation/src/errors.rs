use thiserror::Error;

/// Error produced when parsing move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotationError {
    /// Token that does not match `[UuDdLlRrFfBb]['2]?`
    #[error("invalid move {token:?} at position {index}")]
    InvalidToken {
        /// Text of the offending token.
        token: String,
        /// Index of the token in the script, starting from zero.
        index: usize,
    },
}
