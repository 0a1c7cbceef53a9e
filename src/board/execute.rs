//! `make`/`undo`/`make_null`/`make_uci`: the Position half of the spec's
//! move-application table. Grounded on the teacher's
//! `moves::execute::{make_move_basic, undo_move_basic}` but reworked
//! around a full-recompute Zobrist hash and an explicit `UndoRecord`
//! instead of a deep state snapshot, per §9's re-architecture note.

use super::castle_bits::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};
use super::{Position, UndoRecord};
use crate::error::EngineError;
use crate::moves::types::{Move, MoveKind, PAWN_PUSH};
use crate::piece::{Color, Piece, PieceType};
use crate::square::{file_of, from_algebraic, to_algebraic, NO_SQUARE};

impl Position {
    /// Applies `mv`, assuming it is legal for the side to move. Returns
    /// `ErrInvalidMove` only for structurally nonsensical input (empty
    /// source square, wrong-colored mover); a move that is merely illegal
    /// in this position but otherwise well-formed is the move generator's
    /// responsibility to have excluded.
    pub fn make(&mut self, mv: Move) -> Result<(), EngineError> {
        let moved_piece = self.piece_at(mv.from);
        let (moved_type, moved_color) = match moved_piece {
            Piece::Occupied(t, c) => (t, c),
            Piece::Empty => {
                return Err(EngineError::InvalidMove(format!(
                    "source square {} is empty",
                    to_algebraic(mv.from)
                )))
            }
        };
        if moved_color != self.side_to_move {
            return Err(EngineError::InvalidMove(format!(
                "piece on {} does not belong to {:?}",
                to_algebraic(mv.from),
                self.side_to_move
            )));
        }

        let prior_ep_square = self.ep_square;
        let prior_castling = self.castling;
        let prior_halfmove_clock = self.halfmove_clock;
        let prior_last_irreversible_ply = self.last_irreversible_ply;
        let prior_hash = self.hash;

        let mut captured = self.piece_at(mv.to);
        let mut captured_square = mv.to;

        self.ep_square = NO_SQUARE;
        self.halfmove_clock += 1;

        match mv.kind {
            MoveKind::Quiet => {
                self.clear_square(mv.from);
                self.set_square(mv.to, moved_piece);
            }
            MoveKind::Capture => {
                self.clear_square(mv.to);
                self.clear_square(mv.from);
                self.set_square(mv.to, moved_piece);
            }
            MoveKind::EnPassant => {
                let back_dir: i8 = if moved_color == Color::White { -8 } else { 8 };
                captured_square = mv.to + back_dir;
                captured = self.piece_at(captured_square);
                self.clear_square(mv.from);
                self.set_square(mv.to, moved_piece);
                self.clear_square(captured_square);
            }
            MoveKind::Castle => {
                self.clear_square(mv.from);
                self.set_square(mv.to, moved_piece);
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                let rook_piece = self.piece_at(rook_from);
                self.clear_square(rook_from);
                self.set_square(rook_to, rook_piece);
                match moved_color {
                    Color::White => self.castling &= !(CASTLE_WK | CASTLE_WQ),
                    Color::Black => self.castling &= !(CASTLE_BK | CASTLE_BQ),
                    Color::NoColor => unreachable!("NoColor cannot move"),
                }
            }
            MoveKind::Null => unreachable!("make() does not handle the null move; use make_null()"),
        }

        if mv.is_promotion() {
            self.clear_square(mv.to);
            self.set_square(mv.to, mv.promotion);
        }

        // Pawn double push: set the en-passant square only if an enemy
        // pawn actually sits beside the destination (guards against
        // spurious legal-move signalling on an ep square nobody can use).
        if moved_type == PieceType::Pawn && (mv.to - mv.from).abs() == 16 {
            let ep_candidate = (mv.from + mv.to) / 2;
            let enemy_pawns = self.bb(moved_color.opposite(), PieceType::Pawn);
            let dest_file = file_of(mv.to);
            let mut adjacent_enemy_pawn = false;
            if dest_file > 1 && crate::bitboard::test_bit(enemy_pawns, mv.to - 1) {
                adjacent_enemy_pawn = true;
            }
            if dest_file < 8 && crate::bitboard::test_bit(enemy_pawns, mv.to + 1) {
                adjacent_enemy_pawn = true;
            }
            if adjacent_enemy_pawn {
                self.ep_square = ep_candidate;
            }
        }

        // Castling rights: a rook leaving or being captured on its home
        // corner clears that right; a king move already cleared both
        // above for the Castle case, but a plain king Quiet/Capture move
        // must clear them too.
        if moved_type == PieceType::King && mv.kind != MoveKind::Castle {
            match moved_color {
                Color::White => self.castling &= !(CASTLE_WK | CASTLE_WQ),
                Color::Black => self.castling &= !(CASTLE_BK | CASTLE_BQ),
                Color::NoColor => unreachable!("NoColor cannot move"),
            }
        }
        clear_rook_right_if_touched(self, mv.from);
        clear_rook_right_if_touched(self, mv.to);

        if moved_type == PieceType::Pawn || !captured.is_empty() {
            self.halfmove_clock = 0;
        }

        self.rebuild_attacker_cache();

        self.ply += 1;
        if mv.is_irreversible() {
            self.last_irreversible_ply = self.ply;
        }

        self.hash = self.compute_zobrist();

        self.side_to_move = self.side_to_move.opposite();
        if moved_color == Color::Black {
            self.fullmove += 1;
        }

        self.undo_stack.push(UndoRecord {
            mv,
            moved_piece,
            captured,
            captured_square,
            prior_ep_square,
            prior_castling,
            prior_halfmove_clock,
            prior_last_irreversible_ply,
            prior_hash,
        });
        self.hash_history.push(self.hash);

        Ok(())
    }

    /// Pops one snapshot and restores every field byte-identically. A
    /// programming fault to call with nothing to undo.
    pub fn undo(&mut self) {
        let record = self
            .undo_stack
            .pop()
            .expect("undo() called with an empty undo stack");
        self.hash_history.pop();

        self.side_to_move = self.side_to_move.opposite();
        if self.side_to_move == Color::Black {
            self.fullmove -= 1;
        }

        let mv = record.mv;
        match mv.kind {
            MoveKind::Quiet | MoveKind::Capture => {
                self.clear_square(mv.to);
                self.set_square(mv.from, record.moved_piece);
                if !record.captured.is_empty() {
                    self.set_square(mv.to, record.captured);
                }
            }
            MoveKind::EnPassant => {
                self.clear_square(mv.to);
                self.set_square(mv.from, record.moved_piece);
                self.set_square(record.captured_square, record.captured);
            }
            MoveKind::Castle => {
                let (rook_from, rook_to) = castle_rook_squares(mv.to);
                let rook_piece = self.piece_at(rook_to);
                self.clear_square(rook_to);
                self.set_square(rook_from, rook_piece);
                self.clear_square(mv.to);
                self.set_square(mv.from, record.moved_piece);
            }
            MoveKind::Null => unreachable!("undo() does not handle the null move; use undo_null()"),
        }

        self.ep_square = record.prior_ep_square;
        self.castling = record.prior_castling;
        self.halfmove_clock = record.prior_halfmove_clock;
        self.last_irreversible_ply = record.prior_last_irreversible_ply;
        self.hash = record.prior_hash;
        self.ply -= 1;

        self.rebuild_attacker_cache();
    }

    /// Used only by search for null-move pruning: snapshot, clear
    /// en-passant, flip side, bump ply. Leaves the attacker cache
    /// untouched since no piece moved.
    pub fn make_null(&mut self) {
        self.undo_stack.push(UndoRecord {
            mv: Move::null(),
            moved_piece: Piece::Empty,
            captured: Piece::Empty,
            captured_square: NO_SQUARE,
            prior_ep_square: self.ep_square,
            prior_castling: self.castling,
            prior_halfmove_clock: self.halfmove_clock,
            prior_last_irreversible_ply: self.last_irreversible_ply,
            prior_hash: self.hash,
        });
        self.ep_square = NO_SQUARE;
        self.ply += 1;
        self.side_to_move = self.side_to_move.opposite();
        self.hash = self.compute_zobrist();
        self.hash_history.push(self.hash);
    }

    pub fn undo_null(&mut self) {
        let record = self
            .undo_stack
            .pop()
            .expect("undo_null() called with an empty undo stack");
        self.hash_history.pop();
        self.side_to_move = self.side_to_move.opposite();
        self.ep_square = record.prior_ep_square;
        self.castling = record.prior_castling;
        self.halfmove_clock = record.prior_halfmove_clock;
        self.last_irreversible_ply = record.prior_last_irreversible_ply;
        self.hash = record.prior_hash;
        self.ply -= 1;
    }

    /// Resolves a UCI move literal (`e2e4`, `e7e8q`, `e1g1`) against the
    /// current position and applies it.
    pub fn make_uci(&mut self, text: &str) -> Result<(), EngineError> {
        if text.len() < 4 || text.len() > 5 {
            return Err(EngineError::InvalidMove(format!("malformed uci move '{text}'")));
        }
        let from = from_algebraic(&text[0..2])?;
        let to = from_algebraic(&text[2..4])?;
        let moved = self.piece_at(from);
        let (moved_type, moved_color) = match moved {
            Piece::Occupied(t, c) => (t, c),
            Piece::Empty => {
                return Err(EngineError::InvalidMove(format!(
                    "source square {} is empty",
                    to_algebraic(from)
                )))
            }
        };
        if moved_color != self.side_to_move {
            return Err(EngineError::InvalidMove("wrong color on source square".to_string()));
        }

        let promotion = if text.len() == 5 {
            let ch = text.as_bytes()[4] as char;
            let kind = match ch {
                'n' => PieceType::Knight,
                'b' => PieceType::Bishop,
                'r' => PieceType::Rook,
                'q' => PieceType::Queen,
                _ => return Err(EngineError::InvalidMove(format!("bad promotion char '{ch}'"))),
            };
            Piece::new(kind, moved_color)
        } else {
            Piece::Empty
        };

        let is_castle = moved_type == PieceType::King
            && matches!((from, to), (4, 6) | (4, 2) | (60, 62) | (60, 58));

        let kind = if is_castle {
            MoveKind::Castle
        } else if moved_type == PieceType::Pawn && to == self.ep_square {
            MoveKind::EnPassant
        } else if !self.piece_at(to).is_empty() {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        };

        let mut flags = 0u8;
        if moved_type == PieceType::Pawn && kind != MoveKind::EnPassant && (to - from).abs() % 8 == 0 {
            flags |= PAWN_PUSH;
        }

        let needs_promotion = moved_type == PieceType::Pawn
            && (crate::square::rank_of(to) == 1 || crate::square::rank_of(to) == 8);
        if needs_promotion && promotion.is_empty() {
            return Err(EngineError::InvalidMove(
                "pawn move to the back rank requires a promotion letter".to_string(),
            ));
        }

        let mv = Move::new(from, to, kind, flags, promotion);
        self.make(mv)
    }
}

fn castle_rook_squares(king_to: crate::square::Square) -> (crate::square::Square, crate::square::Square) {
    match king_to {
        6 => (7, 5),    // white O-O: h1 -> f1
        2 => (0, 3),    // white O-O-O: a1 -> d1
        62 => (63, 61), // black O-O: h8 -> f8
        58 => (56, 59), // black O-O-O: a8 -> d8
        _ => unreachable!("castle move must land on c1/g1/c8/g8"),
    }
}

fn clear_rook_right_if_touched(pos: &mut Position, sq: crate::square::Square) {
    match sq {
        0 => pos.castling &= !CASTLE_WQ,
        7 => pos.castling &= !CASTLE_WK,
        56 => pos.castling &= !CASTLE_BQ,
        63 => pos.castling &= !CASTLE_BK,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn make_then_undo_restores_fen() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let before = pos.to_fen();
        pos.make_uci("e2e4").unwrap();
        assert_ne!(pos.to_fen(), before);
        pos.undo();
        assert_eq!(pos.to_fen(), before);
    }

    #[test]
    fn e2e4_matches_spec_scenario() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        pos.make_uci("e2e4").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
    }

    #[test]
    fn white_castles_kingside() {
        let fen = "rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
        let mut pos = Position::from_fen(fen).unwrap();
        pos.make_uci("e1g1").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqk2r/pppp1ppp/5n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4"
        );
    }

    #[test]
    fn en_passant_capture() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let mut pos = Position::from_fen(fen).unwrap();
        pos.make_uci("e5f6").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbnr/ppp1p1pp/5P2/3p4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
        );
    }

    #[test]
    fn promotion_to_queen() {
        let fen = "rnbqkbnr/ppp1p2P/8/8/3p4/8/PPPP1PPP/RNBQKBNR w KQkq - 0 5";
        let mut pos = Position::from_fen(fen).unwrap();
        pos.make_uci("h7g8q").unwrap();
        assert_eq!(
            pos.to_fen(),
            "rnbqkbQr/ppp1p3/8/8/3p4/8/PPPP1PPP/RNBQKBNR b KQkq - 0 5"
        );
    }
}
