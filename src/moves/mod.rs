pub mod attacks;
pub mod movegen;
pub mod perft;
pub mod types;

pub use movegen::{generate, GenMode};
pub use types::{Move, MoveKind, MoveList};
