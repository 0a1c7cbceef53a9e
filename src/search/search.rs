//! Iterative-deepening negamax with alpha-beta, quiescence, a
//! transposition table, killer-move ordering, PV recovery, check
//! extensions, and null-move pruning — the literal pseudocode in the
//! spec, not the teacher's richer RFP/FP/LMR/aspiration-window searcher.
//! The stop flag, iterative-deepening loop shape, and info-line style are
//! grounded on the teacher's `search::search::Searcher`.

use super::context::{KillerTable, PvTable, MAX_PLY};
use super::draw::DrawTable;
use super::eval::{absolute_evaluation, DRAW_SCORE, MATE_SCORE};
use super::ordering;
use super::tt::{NodeType, TTEntry, TranspositionTable};
use crate::board::Position;
use crate::moves::movegen::{generate, GenMode};
use crate::moves::types::{Move, MoveList};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

const INITIAL_ALPHA: i32 = i32::MIN + 1;
const INITIAL_BETA: i32 = i32::MAX - 1;
const NULL_MOVE_R: i32 = 2;
const MAX_CHECK_EXTENSIONS: i32 = 2;

pub struct Searcher {
    tt: TranspositionTable,
    draw_table: DrawTable,
    killers: KillerTable,
    pv: PvTable,
    nodes: u64,
    stop: Arc<AtomicBool>,
    /// The PV line from the last fully completed iterative-deepening
    /// depth; `order()` scores a move at `ply` as a PV move if it matches
    /// `previous_pv[ply]`.
    previous_pv: Vec<Move>,
}

impl Searcher {
    pub fn new() -> Searcher {
        Searcher {
            tt: TranspositionTable::new(),
            draw_table: DrawTable::new(),
            killers: KillerTable::new(),
            pv: PvTable::new(),
            nodes: 0,
            stop: Arc::new(AtomicBool::new(false)),
            previous_pv: Vec::new(),
        }
    }

    /// A clonable handle the host can hand to another task so it can call
    /// `stop()` concurrently with `search()` running here.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Empties the transposition table and draw stack; a host-driven
    /// "new game" operation.
    pub fn reset(&mut self) {
        self.tt.clear();
        self.draw_table.clear();
        self.killers.clear();
        self.pv.clear();
        self.previous_pv.clear();
        self.stop.store(false, Ordering::SeqCst);
    }

    pub fn tt_hits(&self) -> u64 {
        self.tt.hits()
    }

    /// Iterative deepening from depth 1 to `max_depth`. Returns the best
    /// move from the deepest fully completed iteration; a stop mid-depth
    /// discards that depth's (possibly partial) result.
    pub fn search(&mut self, pos: &mut Position, max_depth: u32) -> Move {
        self.stop.store(false, Ordering::SeqCst);
        let start = Instant::now();
        let mut best_move = Move::null();

        for depth in 1..=max_depth {
            self.nodes = 0;
            self.pv.clear();
            self.tt.reset_counters();

            let score = self.negamax(pos, INITIAL_ALPHA, INITIAL_BETA, depth as i32, 0, 0);

            if self.stop.load(Ordering::SeqCst) {
                break;
            }

            best_move = self.pv.best_move();
            self.previous_pv = self.pv.line().to_vec();

            let elapsed_ms = start.elapsed().as_millis().max(1);
            let nps = (self.nodes as u128 * 1000) / elapsed_ms;
            let pv_str = self
                .pv
                .line()
                .iter()
                .map(|m| m.to_uci())
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "info depth {depth} score {score} nodes {} nps {nps} time {elapsed_ms} tthits {} pv {pv_str}",
                self.nodes,
                self.tt.hits(),
            );
        }

        best_move
    }

    fn negamax(&mut self, pos: &mut Position, mut alpha: i32, beta: i32, mut depth: i32, ply: usize, mut ext: i32) -> i32 {
        self.pv.reset_length(ply);

        if self.stop.load(Ordering::SeqCst) {
            return 0;
        }

        let hash = pos.hash;
        if self.draw_table.is_repeat(hash) || pos.is_draw() {
            return DRAW_SCORE;
        }

        let pv_node = (beta - alpha) != 1;
        let side = pos.side_to_move;
        let in_check = pos.king_in_check(side);

        if in_check && ext < MAX_CHECK_EXTENSIONS {
            depth += 1;
            ext += 1;
        }

        let mut moves = MoveList::new();
        generate(pos, GenMode::Legal, &mut moves);
        if moves.is_empty() {
            return if in_check { -MATE_SCORE + ply as i32 } else { DRAW_SCORE };
        }

        if depth <= 0 {
            return if in_check {
                absolute_evaluation(pos)
            } else {
                self.quiescence(pos, alpha, beta)
            };
        }

        self.nodes += 1;

        if ply != 0 {
            if let Some(entry) = self.tt.get(hash) {
                if entry.depth as i32 >= depth {
                    match entry.node_type {
                        NodeType::Exact => {
                            self.pv.record_tt_move(ply, entry.best_move);
                            return entry.score;
                        }
                        NodeType::Upper => {
                            if entry.score <= alpha {
                                return alpha;
                            }
                        }
                        NodeType::Lower => {
                            if entry.score >= beta {
                                return beta;
                            }
                        }
                    }
                }
            }
        }

        if !in_check && !pv_node && depth >= 3 && ply != 0 && ply + 1 < MAX_PLY {
            pos.make_null();
            self.draw_table.push(hash);
            let s = -self.negamax(pos, -beta, -beta + 1, depth - 1 - NULL_MOVE_R, ply + 1, ext);
            self.draw_table.pop();
            pos.undo_null();
            if s >= beta {
                return beta;
            }
        }

        let pv_move = self.previous_pv.get(ply).copied();
        ordering::order(&mut moves, pv_move, &self.killers, side);

        let mut best_score = i32::MIN + 1;
        let mut best_move = Move::null();
        let mut node_type = NodeType::Upper;

        for mv in moves {
            self.draw_table.push(hash);
            if pos.make(mv).is_err() {
                self.draw_table.pop();
                continue;
            }
            let s = if ply + 1 < MAX_PLY {
                -self.negamax(pos, -beta, -alpha, depth - 1, ply + 1, ext)
            } else {
                -absolute_evaluation(pos)
            };
            pos.undo();
            self.draw_table.pop();

            if s > best_score {
                best_score = s;
                best_move = mv;
            }
            if s >= beta {
                node_type = NodeType::Lower;
                if !mv.is_capture() {
                    self.killers.record(side, mv);
                }
                break;
            }
            if s > alpha {
                alpha = s;
                node_type = NodeType::Exact;
                self.pv.update(ply, mv);
            }
        }

        if !self.stop.load(Ordering::SeqCst) {
            self.tt.insert(
                hash,
                TTEntry {
                    node_type,
                    best_move,
                    score: best_score,
                    depth: depth as u32,
                    age: ply as u32,
                },
            );
        }

        best_score
    }

    fn quiescence(&mut self, pos: &mut Position, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let stand_pat = absolute_evaluation(pos);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        let mut moves = MoveList::new();
        generate(pos, GenMode::CapturesOnly, &mut moves);

        for mv in moves {
            if pos.make(mv).is_err() {
                continue;
            }
            let s = -self.quiescence(pos, -beta, -alpha);
            pos.undo();

            if s >= beta {
                return beta;
            }
            if s > alpha {
                alpha = s;
            }
        }

        alpha
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_mate_in_one() {
        // Black king boxed in the h8 corner by its own pawns; Ra1-a8 is
        // mate since g8, the only flight square, lies on the rook's ray.
        let mut pos = Position::from_fen("7k/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mut searcher = Searcher::new();
        let best = searcher.search(&mut pos, 3);
        pos.make(best).unwrap();
        assert!(pos.is_checkmated(crate::piece::Color::Black));
    }

    #[test]
    fn quiescence_never_exceeds_beta() {
        let mut pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let mut searcher = Searcher::new();
        let score = searcher.quiescence(&mut pos, i32::MIN + 1, 100);
        assert!(score <= 100);
    }

    #[test]
    fn stop_flag_short_circuits_to_zero() {
        let mut pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let mut searcher = Searcher::new();
        searcher.stop();
        let score = searcher.negamax(&mut pos, INITIAL_ALPHA, INITIAL_BETA, 4, 0, 0);
        assert_eq!(score, 0);
        assert_eq!(searcher.pv.lengths[0], 0);
    }
}
