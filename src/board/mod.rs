//! Position: bitboard board state, side to move, castling, en-passant,
//! clocks, Zobrist hash, and the attacker cache, plus the invariants in
//! the crate-level docs. Grounded on the teacher's `board::Board` (same
//! field shape) but diverging where the spec requires it: a full-recompute
//! Zobrist hash instead of incremental XOR, and a deliberately simpler
//! `is_draw`/`is_stalemate` than the teacher's FIDE-granular `status.rs`.

pub mod castle_bits;
pub mod execute;
pub mod fen;

use crate::bitboard::{self, Bitboard};
use crate::error::EngineError;
use crate::hash::zobrist_keys;
use crate::moves::attacks;
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;
use castle_bits::CastleBits;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Opening,
    Endgame,
}

/// One entry per completed `make()`, enough to restore every field
/// `undo()` touches. The attacker cache is not stored here: it is cheap
/// to recompute from the restored piece placement (see §9 of the spec —
/// both strategies satisfy the invariant).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct UndoRecord {
    pub mv: crate::moves::types::Move,
    pub moved_piece: Piece,
    pub captured: Piece,
    pub captured_square: Square,
    pub prior_ep_square: Square,
    pub prior_castling: CastleBits,
    pub prior_halfmove_clock: u32,
    pub prior_last_irreversible_ply: u32,
    pub prior_hash: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub side_to_move: Color,
    /// Indexed by `PieceType::index()`; union of both colors.
    pub(crate) piece_bb: [Bitboard; 6],
    /// Indexed by `Color::index()` (White/Black only).
    pub(crate) color_bb: [Bitboard; 2],
    pub(crate) squares: [Piece; 64],
    pub(crate) attackers: [Bitboard; 64],
    pub ep_square: Square,
    pub castling: CastleBits,
    pub halfmove_clock: u32,
    pub ply: u32,
    pub last_irreversible_ply: u32,
    pub hash: u64,
    /// Not named in the invariants list but required for FEN round-trip
    /// (§8 property 1): incremented whenever Black completes a move.
    pub fullmove: u32,
    pub(crate) undo_stack: Vec<UndoRecord>,
    pub(crate) hash_history: Vec<u64>,
}

impl Position {
    pub fn new_empty() -> Position {
        Position {
            side_to_move: Color::White,
            piece_bb: [0; 6],
            color_bb: [0; 2],
            squares: [Piece::Empty; 64],
            attackers: [0; 64],
            ep_square: crate::square::NO_SQUARE,
            castling: castle_bits::CASTLE_NONE,
            halfmove_clock: 0,
            ply: 0,
            last_irreversible_ply: 0,
            hash: 0,
            fullmove: 1,
            undo_stack: Vec::new(),
            hash_history: vec![0],
        }
    }

    #[inline]
    pub fn bb(&self, color: Color, piece: PieceType) -> Bitboard {
        self.piece_bb[piece.index()] & self.color_bb[color.index()]
    }

    #[inline]
    pub fn piece_bb_of(&self, piece: PieceType) -> Bitboard {
        self.piece_bb[piece.index()]
    }

    #[inline]
    pub fn color_bb_of(&self, color: Color) -> Bitboard {
        self.color_bb[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.color_bb[0] | self.color_bb[1]
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        assert!((0..64).contains(&sq), "square index {sq} out of range");
        self.squares[sq as usize]
    }

    /// Places `piece` on `sq`, clearing whatever was there first. Does not
    /// touch the Zobrist hash (callers recompute it wholesale) or the
    /// attacker cache.
    pub(crate) fn set_square(&mut self, sq: Square, piece: Piece) {
        assert!((0..64).contains(&sq), "square index {sq} out of range");
        self.clear_square(sq);
        if let Piece::Occupied(t, c) = piece {
            bitboard::set_bit(&mut self.piece_bb[t.index()], sq);
            bitboard::set_bit(&mut self.color_bb[c.index()], sq);
        }
        self.squares[sq as usize] = piece;
    }

    pub(crate) fn clear_square(&mut self, sq: Square) {
        assert!((0..64).contains(&sq), "square index {sq} out of range");
        if let Piece::Occupied(t, c) = self.squares[sq as usize] {
            bitboard::clear_bit(&mut self.piece_bb[t.index()], sq);
            bitboard::clear_bit(&mut self.color_bb[c.index()], sq);
        }
        self.squares[sq as usize] = Piece::Empty;
    }

    pub fn king_square(&self, color: Color) -> Square {
        let bb = self.bb(color, PieceType::King);
        assert_ne!(bb, 0, "no king on the board for {color:?}");
        bitboard::lsb(bb)
    }

    /// Recomputes the full Zobrist hash from piece placement, side to
    /// move, castling rights, and the en-passant file — not incrementally
    /// maintained, per the spec's "correctness supersedes speed" note.
    pub fn compute_zobrist(&self) -> u64 {
        let keys = zobrist_keys();
        let mut h = 0u64;
        for sq in 0..64i8 {
            if let Piece::Occupied(t, c) = self.squares[sq as usize] {
                h ^= keys.pieces[sq as usize][t.index()][c.index()];
            }
        }
        if self.side_to_move == Color::White {
            h ^= keys.side_to_move;
        }
        h ^= keys.castling[self.castling as usize];
        if self.ep_square != crate::square::NO_SQUARE {
            let file = crate::square::file_of(self.ep_square) as usize - 1;
            h ^= keys.ep_file[file];
        }
        h
    }

    /// Rebuilds `attackers[sq]` for every square: for each occupied square,
    /// OR its from-square bit into `attackers[to]` for every `to` it
    /// attacks (pawns via captures only, never pushes).
    pub(crate) fn rebuild_attacker_cache(&mut self) {
        self.attackers = [0; 64];
        let occupied = self.occupied();
        for from in 0..64i8 {
            let piece = self.squares[from as usize];
            let (t, c) = match piece {
                Piece::Occupied(t, c) => (t, c),
                Piece::Empty => continue,
            };
            let attack_bb = match t {
                PieceType::Pawn => pawn_capture_targets(from, c),
                PieceType::Knight => attacks::knight_attacks(from as usize),
                PieceType::King => attacks::king_attacks(from as usize),
                PieceType::Bishop => attacks::bishop_attacks(from as usize, occupied),
                PieceType::Rook => attacks::rook_attacks(from as usize, occupied),
                PieceType::Queen => attacks::queen_attacks(from as usize, occupied),
            };
            let mut bb = attack_bb;
            while bb != 0 {
                let to = bitboard::pop_lsb(&mut bb);
                bitboard::set_bit(&mut self.attackers[to as usize], from);
            }
        }
    }

    #[inline]
    pub fn attackers_of(&self, sq: Square) -> Bitboard {
        self.attackers[sq as usize]
    }

    #[inline]
    pub fn attacked_by(&self, sq: Square, color: Color) -> bool {
        self.attackers_of(sq) & self.color_bb_of(color) != 0
    }

    #[inline]
    pub fn king_in_check(&self, color: Color) -> bool {
        self.attacked_by(self.king_square(color), color.opposite())
    }

    #[inline]
    pub fn number_of_checkers(&self, color: Color) -> u32 {
        bitboard::popcount(self.attackers_of(self.king_square(color)) & self.color_bb_of(color.opposite()))
    }

    /// Walks `hash_history` back to the last irreversible ply, counting
    /// matches of the current hash — not the undo chain's length, the
    /// hashes recorded along it.
    pub fn repetition_count(&self) -> u32 {
        let start = self.last_irreversible_ply as usize;
        let mut count = 0;
        for &h in &self.hash_history[start..=self.ply as usize] {
            if h == self.hash {
                count += 1;
            }
        }
        count
    }

    pub fn is_threefold(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Fifty-move clock >= 100 half-moves, OR repetitions >= 3, OR both
    /// sides have <= 1 piece (lone-king simplification). The last
    /// disjunct is only strictly correct for lone-king vs lone-king; kept
    /// as specified rather than silently tightened (see DESIGN.md).
    pub fn is_draw(&self) -> bool {
        if self.halfmove_clock >= 100 {
            return true;
        }
        if self.is_threefold() {
            return true;
        }
        bitboard::popcount(self.color_bb_of(Color::White)) <= 1
            && bitboard::popcount(self.color_bb_of(Color::Black)) <= 1
    }

    /// King in check AND every surrounding king-move square is either
    /// attacked by the opponent or occupied by a friendly piece. This is
    /// the "no evading target" check only; the caller's legal-move search
    /// still confirms mate vs. block/capture availability when it needs to.
    pub fn is_checkmated(&self, color: Color) -> bool {
        if !self.king_in_check(color) {
            return false;
        }
        let king_sq = self.king_square(color);
        let mut targets = attacks::king_attacks(king_sq as usize);
        let own = self.color_bb_of(color);
        let opp = color.opposite();
        while targets != 0 {
            let to = bitboard::pop_lsb(&mut targets);
            let blocked_by_own = bitboard::test_bit(own, to);
            let attacked = self.attacked_by(to, opp);
            if !blocked_by_own && !attacked {
                return false;
            }
        }
        true
    }

    /// Not in check and, once it actually is `color`'s turn (a null move
    /// is made and undone around the query if it wasn't already), the
    /// legal-move generator produces nothing.
    pub fn is_stalemate(&self, color: Color) -> bool {
        if self.king_in_check(color) {
            return false;
        }
        let mut scratch = crate::moves::types::MoveList::new();
        if self.side_to_move == color {
            crate::moves::movegen::generate(self, crate::moves::movegen::GenMode::Legal, &mut scratch);
            scratch.is_empty()
        } else {
            let mut pos = self.clone();
            pos.make_null();
            crate::moves::movegen::generate(&pos, crate::moves::movegen::GenMode::Legal, &mut scratch);
            scratch.is_empty()
        }
    }

    /// `Endgame` if there are no queens on the board, or each side has at
    /// most one queen and at most one minor piece; otherwise `Opening`.
    /// Binary, not tapered — the evaluator selects one of two PSTs.
    pub fn phase(&self) -> Phase {
        let queens = self.piece_bb_of(PieceType::Queen);
        if queens == 0 {
            return Phase::Endgame;
        }
        let white_queens = bitboard::popcount(self.bb(Color::White, PieceType::Queen));
        let black_queens = bitboard::popcount(self.bb(Color::Black, PieceType::Queen));
        let white_minors = bitboard::popcount(self.bb(Color::White, PieceType::Bishop))
            + bitboard::popcount(self.bb(Color::White, PieceType::Knight));
        let black_minors = bitboard::popcount(self.bb(Color::Black, PieceType::Bishop))
            + bitboard::popcount(self.bb(Color::Black, PieceType::Knight));
        if white_queens <= 1 && black_queens <= 1 && white_minors <= 1 && black_minors <= 1 {
            Phase::Endgame
        } else {
            Phase::Opening
        }
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Checks every invariant in the crate-level docs; used by
    /// `from_fen` and available to callers building positions by hand.
    pub fn validate(&self) -> Result<(), EngineError> {
        for color in [Color::White, Color::Black] {
            let count = bitboard::popcount(self.color_bb_of(color));
            if !(1..=16).contains(&count) {
                return Err(EngineError::InvalidPosition(format!(
                    "{color:?} has {count} pieces, expected 1..=16"
                )));
            }
            let kings = bitboard::popcount(self.bb(color, PieceType::King));
            if kings != 1 {
                return Err(EngineError::InvalidPosition(format!(
                    "{color:?} has {kings} kings, expected exactly 1"
                )));
            }
            let pawns = bitboard::popcount(self.bb(color, PieceType::Pawn));
            if pawns > 8 {
                return Err(EngineError::InvalidPosition(format!(
                    "{color:?} has {pawns} pawns, expected at most 8"
                )));
            }
        }
        let pawns_on_back_ranks =
            self.piece_bb_of(PieceType::Pawn) & (bitboard::RANK_1 | bitboard::RANK_8);
        if pawns_on_back_ranks != 0 {
            return Err(EngineError::InvalidPosition(
                "pawn on rank 1 or rank 8".to_string(),
            ));
        }
        if self.color_bb_of(Color::White) & self.color_bb_of(Color::Black) != 0 {
            return Err(EngineError::InvalidPosition(
                "white and black occupancy overlap".to_string(),
            ));
        }
        if self.king_in_check(self.side_to_move.opposite()) {
            return Err(EngineError::InvalidPosition(
                "side not to move is in check".to_string(),
            ));
        }
        if self.number_of_checkers(self.side_to_move) > 2 {
            return Err(EngineError::InvalidPosition(
                "side to move has more than 2 checkers".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pawn capture targets only (no pushes), used by the attacker cache.
fn pawn_capture_targets(from: Square, color: Color) -> Bitboard {
    let file = crate::square::file_of(from);
    let dir: i8 = if color == Color::White { 8 } else { -8 };
    let mut bb = 0u64;
    if file > 1 {
        let to = from + dir - 1;
        if (0..64).contains(&to) {
            bitboard::set_bit(&mut bb, to);
        }
    }
    if file < 8 {
        let to = from + dir + 1;
        if (0..64).contains(&to) {
            bitboard::set_bit(&mut bb, to);
        }
    }
    bb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_position_has_no_pieces() {
        let p = Position::new_empty();
        assert_eq!(p.occupied(), 0);
    }
}
