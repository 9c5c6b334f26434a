use thiserror::Error;

/// Error produced when parsing a move token.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// Empty token
    #[error("empty move")]
    Empty,
    /// Token is not a face turn
    #[error("bad move: {0:?}")]
    BadMove(String),
}
