//! A fixed random table, seeded deterministically so the same stream is
//! produced every run. Unlike the teacher's `hash::zobrist` (incremental
//! XOR, feature-gated determinism), `Position` recomputes the hash from
//! scratch on every `make()` — see `Position::compute_zobrist`. Recompute
//! supersedes speed here; the fixed seed is unconditional, not behind a
//! `deterministic_zobrist` feature, because reproducible hashes matter for
//! every consumer, not just tests.

use once_cell::sync::OnceCell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Arbitrary but fixed; changing it changes every hash the engine ever
/// produces, so it is not meant to be tuned.
const ZOBRIST_SEED: u64 = 0x5EED_F00D_C0FF_EE42;

pub struct ZobristKeys {
    /// `[square][piece_type_index][color_index]`
    pub pieces: [[[u64; 2]; 6]; 64],
    pub side_to_move: u64,
    /// Indexed by the 4-bit castling-rights bitset (`WK|WQ|BK|BQ`).
    pub castling: [u64; 16],
    /// Indexed by file (0..8); the en-passant square's file, when present.
    pub ep_file: [u64; 8],
}

impl ZobristKeys {
    fn generate() -> ZobristKeys {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut pieces = [[[0u64; 2]; 6]; 64];
        for sq in pieces.iter_mut() {
            for pt in sq.iter_mut() {
                for color in pt.iter_mut() {
                    *color = rng.random::<u64>();
                }
            }
        }
        let side_to_move = rng.random::<u64>();
        let mut castling = [0u64; 16];
        for key in castling.iter_mut() {
            *key = rng.random::<u64>();
        }
        let mut ep_file = [0u64; 8];
        for key in ep_file.iter_mut() {
            *key = rng.random::<u64>();
        }
        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            ep_file,
        }
    }
}

static ZOBRIST_KEYS: OnceCell<ZobristKeys> = OnceCell::new();

pub fn zobrist_keys() -> &'static ZobristKeys {
    ZOBRIST_KEYS.get_or_init(ZobristKeys::generate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_across_calls() {
        let a = ZobristKeys::generate();
        let b = ZobristKeys::generate();
        assert_eq!(a.pieces[3][2][1], b.pieces[3][2][1]);
        assert_eq!(a.side_to_move, b.side_to_move);
    }

    #[test]
    fn global_is_stable() {
        let a = zobrist_keys().side_to_move;
        let b = zobrist_keys().side_to_move;
        assert_eq!(a, b);
    }
}
