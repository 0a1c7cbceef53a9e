pub mod zobrist;

pub use zobrist::zobrist_keys;
