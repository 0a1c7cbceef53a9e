//! Per-search mutable state that doesn't belong to the position itself:
//! the PV table and per-color killer-move ring buffers. Grounded on the
//! teacher's `search::context::SearchContext`, but the killer scheme is a
//! deliberate departure from the teacher's per-ply two-slot array: the
//! spec wants one ring buffer per color, not per ply.

use crate::moves::types::Move;
use crate::piece::Color;

/// Generous upper bound on ply depth (iterative-deepening max depth plus
/// check extensions plus quiescence); PV/killers never index past this.
pub const MAX_PLY: usize = 128;

const MAX_KILLERS: usize = 128;

#[derive(Debug, Clone)]
struct KillerRing {
    moves: Vec<Move>,
    next: usize,
}

impl KillerRing {
    fn new() -> KillerRing {
        KillerRing {
            moves: Vec::new(),
            next: 0,
        }
    }

    /// Append-unique; once at `MAX_KILLERS` capacity, overwrites starting
    /// from index 0 and wraps.
    fn record(&mut self, mv: Move) {
        if self.moves.iter().any(|&m| m == mv) {
            return;
        }
        if self.moves.len() < MAX_KILLERS {
            self.moves.push(mv);
        } else {
            self.moves[self.next] = mv;
            self.next = (self.next + 1) % MAX_KILLERS;
        }
    }

    fn contains(&self, mv: Move) -> bool {
        self.moves.iter().any(|&m| m == mv)
    }

    fn clear(&mut self) {
        self.moves.clear();
        self.next = 0;
    }
}

#[derive(Debug, Clone)]
pub struct KillerTable {
    white: KillerRing,
    black: KillerRing,
}

impl KillerTable {
    pub fn new() -> KillerTable {
        KillerTable {
            white: KillerRing::new(),
            black: KillerRing::new(),
        }
    }

    fn ring(&self, color: Color) -> &KillerRing {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
            Color::NoColor => panic!("no killer ring for NoColor"),
        }
    }

    fn ring_mut(&mut self, color: Color) -> &mut KillerRing {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
            Color::NoColor => panic!("no killer ring for NoColor"),
        }
    }

    /// Only non-captures are recorded on a beta cutoff — the caller
    /// enforces that; this just appends.
    pub fn record(&mut self, color: Color, mv: Move) {
        self.ring_mut(color).record(mv);
    }

    pub fn is_killer(&self, color: Color, mv: Move) -> bool {
        self.ring(color).contains(mv)
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// PV table of shape `[MAX_PLY][MAX_PLY]` plus a parallel length array, the
/// shape named explicitly in the spec (§4.K).
#[derive(Debug, Clone)]
pub struct PvTable {
    table: Vec<Vec<Move>>,
    pub lengths: Vec<usize>,
}

impl PvTable {
    pub fn new() -> PvTable {
        PvTable {
            table: vec![vec![Move::null(); MAX_PLY]; MAX_PLY],
            lengths: vec![0; MAX_PLY],
        }
    }

    pub fn clear(&mut self) {
        for row in self.table.iter_mut() {
            row.fill(Move::null());
        }
        self.lengths.fill(0);
    }

    pub fn reset_length(&mut self, ply: usize) {
        self.lengths[ply] = ply;
    }

    /// Records `mv` as the best move at `ply`, then copies the child's
    /// continuation (`ply+1 .. pvlength[ply+1]`) in behind it.
    pub fn update(&mut self, ply: usize, mv: Move) {
        self.table[ply][ply] = mv;
        let child_len = self.lengths[ply + 1];
        for i in (ply + 1)..child_len {
            let child_move = self.table[ply + 1][i];
            self.table[ply][i] = child_move;
        }
        self.lengths[ply] = child_len;
    }

    /// Records a single-move PV at `ply` from a transposition-table Exact
    /// hit — produces a length-1 PV at this ply rather than a full
    /// reconstruction (§9: optional but not required).
    pub fn record_tt_move(&mut self, ply: usize, mv: Move) {
        self.table[ply][ply] = mv;
        self.lengths[ply] = ply + 1;
    }

    pub fn best_move(&self) -> Move {
        self.table[0][0]
    }

    pub fn line(&self) -> &[Move] {
        &self.table[0][0..self.lengths[0]]
    }
}

impl Default for PvTable {
    fn default() -> Self {
        Self::new()
    }
}
