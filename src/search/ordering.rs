//! Move ordering, deliberately much simpler than the teacher's MVV-LVA/
//! SEE/history scheme: PV move from the previous iteration at this ply
//! scores 2000, a killer for the side to move scores 1000, everything
//! else scores 0 and keeps the move generator's iteration order.

use super::context::KillerTable;
use crate::moves::types::{Move, MoveList};
use crate::piece::Color;

const PV_SCORE: i32 = 2000;
const KILLER_SCORE: i32 = 1000;

fn score(mv: Move, pv_move: Option<Move>, killers: &KillerTable, side: Color) -> i32 {
    if pv_move == Some(mv) {
        PV_SCORE
    } else if killers.is_killer(side, mv) {
        KILLER_SCORE
    } else {
        0
    }
}

/// Stable sort by descending order score; ties keep the generator's order.
pub fn order(moves: &mut MoveList, pv_move: Option<Move>, killers: &KillerTable, side: Color) {
    let mut scored: Vec<(i32, Move)> = moves
        .iter()
        .map(|&mv| (score(mv, pv_move, killers, side), mv))
        .collect();
    scored.sort_by_key(|&(s, _)| std::cmp::Reverse(s));
    moves.clear();
    for (_, mv) in scored {
        moves.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::types::MoveKind;
    use crate::piece::Piece;

    fn mv(from: i8, to: i8) -> Move {
        Move::new(from, to, MoveKind::Quiet, 0, Piece::Empty)
    }

    #[test]
    fn pv_move_sorts_first() {
        let mut moves = MoveList::new();
        moves.push(mv(0, 1));
        moves.push(mv(2, 3));
        moves.push(mv(4, 5));
        let killers = KillerTable::new();
        order(&mut moves, Some(mv(4, 5)), &killers, Color::White);
        assert_eq!(moves[0], mv(4, 5));
    }

    #[test]
    fn killer_sorts_above_unscored() {
        let mut moves = MoveList::new();
        moves.push(mv(0, 1));
        moves.push(mv(2, 3));
        let mut killers = KillerTable::new();
        killers.record(Color::White, mv(2, 3));
        order(&mut moves, None, &killers, Color::White);
        assert_eq!(moves[0], mv(2, 3));
    }
}
