//! Node-counting move-generator exerciser, grounded on the teacher's
//! `moves::perft` but trimmed to what the spec's testable properties need:
//! plain node counts and a `divide` breakdown by root move.

use super::movegen::{generate, GenMode};
use super::types::MoveList;
use crate::board::Position;
use tracing::instrument;

#[instrument(skip(pos), fields(depth))]
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves = MoveList::new();
    generate(pos, GenMode::Legal, &mut moves);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        pos.make(mv).expect("perft move generator produced an illegal move");
        nodes += perft(pos, depth - 1);
        pos.undo();
    }
    nodes
}

/// Per-root-move node counts, the standard way to localize a perft
/// mismatch to a single branch.
pub fn perft_divide(pos: &mut Position, depth: u32) -> Vec<(super::types::Move, u64)> {
    let mut moves = MoveList::new();
    generate(pos, GenMode::Legal, &mut moves);
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        pos.make(mv).expect("perft move generator produced an illegal move");
        let count = if depth == 0 { 1 } else { perft(pos, depth - 1) };
        pos.undo();
        out.push((mv, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Position {
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap()
    }

    #[test]
    fn perft_depth_1() {
        assert_eq!(perft(&mut start(), 1), 20);
    }

    #[test]
    fn perft_depth_2() {
        assert_eq!(perft(&mut start(), 2), 400);
    }

    #[test]
    fn perft_depth_3() {
        assert_eq!(perft(&mut start(), 3), 8_902);
    }

    #[test]
    fn perft_depth_4() {
        assert_eq!(perft(&mut start(), 4), 197_281);
    }
}
