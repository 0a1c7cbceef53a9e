//! Material + two-phase (opening/endgame, not tapered) piece-square-table
//! evaluator, plus pawn-file and bishop-pair bonuses. Square tables are
//! ported from the original evaluator's constants, white's perspective,
//! file-major with index 0 = a1; black reads the vertically mirrored
//! square (`sq ^ 56`), per the spec rather than the source's full-array
//! reverse (which also flips files and would misplace the king table's
//! castling-side skew).

use crate::bitboard::{self, FILES};
use crate::board::{Phase, Position};
use crate::piece::{Color, PieceType};

pub const MATE_SCORE: i32 = 50_000;
pub const DRAW_SCORE: i32 = 0;

const DOUBLE_PAWN_PENALTY: i32 = -10;
const SEMI_OPEN_FILE_BONUS: i32 = 10;
const OPEN_FILE_BONUS: i32 = SEMI_OPEN_FILE_BONUS * 2;
const BISHOP_PAIR_BONUS: i32 = 20;

#[rustfmt::skip]
const PAWN_OPENING: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-10,-10, 10, 10,  5,
     5,  0,  0,  5,  5,  0,  0,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     0,  0,  0, 25, 25,  0,  0,  0,
    30, 30, 30, 40, 40, 30, 30, 30,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const PAWN_ENDGAME: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
    10, 10, 10, 10, 10, 10, 10, 10,
    20, 20, 20, 25, 25, 20, 20, 20,
    30, 30, 30, 35, 35, 30, 30, 30,
    30, 30, 30, 40, 40, 30, 30, 30,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_BOTH: [i32; 64] = [
    -50,-20,-20,-20,-20,-20,-20,-50,
    -30,  0,  0,  5,  5,  0,  0,-30,
    -20,  0,  5,  0,  0,  5,  0,-20,
    -20,  0, 20, 20, 20, 20,  0,-20,
    -20,  0,  0, 20, 20,  0,  0,-20,
    -20,  0,  0,  0,  0,  0,  0,-20,
    -30,  0,  0,  0,  0,  0,  0,-30,
    -50,-20,-20,-20,-20,-20,-20,-50,
];

#[rustfmt::skip]
const BISHOP_BOTH: [i32; 64] = [
     -5,-10,-10,-10,-10,-10,-10, -5,
    -10,  5,  0,  5,  5,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
     -5,-10,-10,-10,-10,-10,-10, -5,
];

#[rustfmt::skip]
const ROOK_BOTH: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_BOTH: [i32; 64] = [
     -5,-10,-10, -5, -5,-10,-10, -5,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  5,-10,
      5,  0,  0, 10, 10,  0,  0,-10,
    -10,  0,  0, 10, 10,  0,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
     -5,-10,-10, -5, -5,-10,-10, -5,
];

#[rustfmt::skip]
const KING_OPENING: [i32; 64] = [
      0,  0, 30,  0,  0, 20, 30,  0,
    -10,-10,-10,  0,  0,-10,-10,-10,
    -20,-20,-20,-10,-10,-20,-20,-20,
    -30,-30,-30,-30,-30,-30,-30,-30,
    -40,-40,-40,-40,-40,-40,-40,-40,
    -50,-50,-50,-50,-50,-50,-50,-50,
    -50,-50,-50,-50,-50,-50,-50,-50,
    -50,-50,-50,-50,-50,-50,-50,-50,
];

#[rustfmt::skip]
const KING_ENDGAME: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -30,-20,-10,-10,-10,-10,-20,-30,
    -30,-10,-10,-10,-10,-10,-10,-30,
    -30, -5, -5, 40, 40, -5, -5,-30,
    -30, -5, -5, 40, 40, -5, -5,-30,
    -30,  0,  0,  0,  0,  0,  0,-30,
    -30,  0,  0,  0,  0,  0,  0,-30,
    -50,-40,  0,  0,  0,  0,-40,-50,
];

fn pst(phase: Phase, piece_type: PieceType, sq: usize) -> i32 {
    match (piece_type, phase) {
        (PieceType::Pawn, Phase::Opening) => PAWN_OPENING[sq],
        (PieceType::Pawn, Phase::Endgame) => PAWN_ENDGAME[sq],
        (PieceType::Knight, _) => KNIGHT_BOTH[sq],
        (PieceType::Bishop, _) => BISHOP_BOTH[sq],
        (PieceType::Rook, _) => ROOK_BOTH[sq],
        (PieceType::Queen, _) => QUEEN_BOTH[sq],
        (PieceType::King, Phase::Opening) => KING_OPENING[sq],
        (PieceType::King, Phase::Endgame) => KING_ENDGAME[sq],
    }
}

#[inline]
fn mirror(sq: usize, color: Color) -> usize {
    if color == Color::White {
        sq
    } else {
        sq ^ 56
    }
}

fn evaluate_side(pos: &Position, color: Color) -> i32 {
    let phase = pos.phase();
    let mut score = 0i32;

    let mut own = pos.color_bb_of(color);
    while own != 0 {
        let sq = bitboard::pop_lsb(&mut own);
        let piece = pos.piece_at(sq);
        let Some(piece_type) = piece.piece_type() else {
            continue;
        };
        score += piece.value();
        score += pst(phase, piece_type, mirror(sq as usize, color));
    }

    let own_pawns = pos.bb(color, PieceType::Pawn);
    let all_pawns = pos.piece_bb_of(PieceType::Pawn);
    for file_bb in FILES {
        let count = bitboard::popcount(own_pawns & file_bb);
        if count >= 2 {
            score += DOUBLE_PAWN_PENALTY;
        } else if count == 0 {
            score += SEMI_OPEN_FILE_BONUS;
        }
        if bitboard::popcount(all_pawns & file_bb) == 0 {
            score += OPEN_FILE_BONUS;
        }
    }

    if bitboard::popcount(pos.bb(color, PieceType::Bishop)) >= 2 {
        score += BISHOP_PAIR_BONUS;
    }

    score
}

/// White-minus-black score. Draws score 0; a checkmated side scores
/// `MATE_SCORE` against it, from white's perspective.
pub fn evaluate(pos: &Position) -> i32 {
    if pos.is_draw() {
        return DRAW_SCORE;
    }
    let turn = pos.side_to_move;
    if pos.is_checkmated(turn) {
        return if turn == Color::White { -MATE_SCORE } else { MATE_SCORE };
    }
    evaluate_side(pos, Color::White) - evaluate_side(pos, Color::Black)
}

/// `evaluate(pos)` from the side-to-move's perspective — the value
/// negamax actually wants.
pub fn absolute_evaluation(pos: &Position) -> i32 {
    let multiplier = if pos.side_to_move == Color::White { 1 } else { -1 };
    evaluate(pos) * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;

    #[test]
    fn starting_position_is_balanced() {
        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(evaluate(&pos), 0);
    }

    #[test]
    fn extra_queen_favors_white() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert!(evaluate(&pos) > 0);
    }

    #[test]
    fn bishop_pair_bonus_applies() {
        let with_pair = Position::from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
        let without_pair = Position::from_fen("4k3/8/8/8/8/8/8/3BK3 w - - 0 1").unwrap();
        let pair_bonus = evaluate(&with_pair) - 2 * crate::piece::Piece::new(PieceType::Bishop, Color::White).value();
        let single_bonus = evaluate(&without_pair) - crate::piece::Piece::new(PieceType::Bishop, Color::White).value();
        assert!(pair_bonus > single_bonus);
    }
}
