/// Castling-rights bitset: `{WK, WQ, BK, BQ}`.
pub type CastleBits = u8;

pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;
pub const CASTLE_NONE: CastleBits = 0;
pub const CASTLE_ALL: CastleBits = CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_are_disjoint() {
        assert_eq!(CASTLE_WK & CASTLE_WQ, 0);
        assert_eq!(CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ, CASTLE_ALL);
    }
}
