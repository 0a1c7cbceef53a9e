use crate::error::EngineError;

/// A square index in `[0, 63]`, or `-1` for "no square" (used by the
/// en-passant field). Rank 1 = white's first rank, file 1 = the a-file:
/// `square = (rank - 1) * 8 + (file - 1)`.
pub type Square = i8;

pub const NO_SQUARE: Square = -1;

#[inline]
pub fn square_of(rank: u8, file: u8) -> Square {
    debug_assert!((1..=8).contains(&rank) && (1..=8).contains(&file));
    ((rank - 1) * 8 + (file - 1)) as Square
}

#[inline]
pub fn rank_of(sq: Square) -> u8 {
    assert!((0..64).contains(&sq), "square index {sq} out of range");
    (sq as u8) / 8 + 1
}

#[inline]
pub fn file_of(sq: Square) -> u8 {
    assert!((0..64).contains(&sq), "square index {sq} out of range");
    (sq as u8) % 8 + 1
}

/// Converts a square to its algebraic form (`"e4"`). Total over the valid
/// domain; calling this on an out-of-range index is a programming fault.
pub fn to_algebraic(sq: Square) -> String {
    assert!((0..64).contains(&sq), "square index {sq} out of range");
    let file = file_of(sq);
    let rank = rank_of(sq);
    let f = (b'a' + (file - 1)) as char;
    format!("{f}{rank}")
}

/// Parses an algebraic square (`"e4"`). Fails for anything outside
/// `a1`..`h8`.
pub fn from_algebraic(s: &str) -> Result<Square, EngineError> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return Err(EngineError::InvalidFen(format!("bad square '{s}'")));
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(EngineError::InvalidFen(format!("bad square '{s}'")));
    }
    Ok(square_of(rank - b'0', file - b'a' + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_square() {
        for sq in 0..64i8 {
            let alg = to_algebraic(sq);
            assert_eq!(from_algebraic(&alg).unwrap(), sq);
        }
    }

    #[test]
    fn a1_is_zero() {
        assert_eq!(from_algebraic("a1").unwrap(), 0);
        assert_eq!(to_algebraic(0), "a1");
    }

    #[test]
    fn h8_is_63() {
        assert_eq!(from_algebraic("h8").unwrap(), 63);
        assert_eq!(to_algebraic(63), "h8");
    }

    #[test]
    fn rejects_garbage() {
        assert!(from_algebraic("i9").is_err());
        assert!(from_algebraic("a").is_err());
    }
}
