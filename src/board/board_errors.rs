use std::error::Error;
use std::fmt;

pub type BoardResult<T> = Result<T, BoardError>;

/// Failures reported by the board controller.
///
/// None of them are fatal; the board is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Destination not reachable, fogged, or the move string names no legal move.
    IllegalMove(String),
    /// Malformed FEN handed to `set_position`.
    InvalidPosition(String),
    /// Square name that is not `a1`..`h8`.
    InvalidSquare(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::IllegalMove(msg) => write!(f, "illegal move: {msg}"),
            BoardError::InvalidPosition(msg) => write!(f, "invalid position: {msg}"),
            BoardError::InvalidSquare(msg) => write!(f, "invalid square: {msg}"),
        }
    }
}

impl Error for BoardError {}
