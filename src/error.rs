use thiserror::Error;

/// Errors surfaced across parsing and move application.
///
/// These are the only fallible, caller-recoverable outcomes in the core.
/// Internal corruption (an out-of-range square, `undo()` with nothing to
/// undo, `NoColor` reaching a game-progressing operation) is a programming
/// fault and panics instead of returning one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid fen: {0}")]
    InvalidFen(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
