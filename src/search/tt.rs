//! Fixed-capacity transposition table keyed by Zobrist hash. Grounded on
//! the teacher's `search::tt`, but capacity is derived as `64 MiB /
//! sizeof(entry)` and replacement is "clear when full" rather than the
//! teacher's generation-based always-replace scheme — an explicitly
//! preserved open question (§9): most engines prefer an always-replace or
//! depth-preferred bucket, but the spec calls for the destructive clear.

use crate::moves::types::Move;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub node_type: NodeType,
    pub best_move: Move,
    pub score: i32,
    pub depth: u32,
    /// Ply at write time.
    pub age: u32,
}

const KB: usize = 1024;
const MB: usize = KB * KB;
const TABLE_BUDGET_BYTES: usize = 64 * MB;

pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    pub fn new() -> TranspositionTable {
        let capacity = TABLE_BUDGET_BYTES / std::mem::size_of::<TTEntry>();
        TranspositionTable {
            table: HashMap::with_capacity(capacity.min(1 << 20)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, hash: u64) -> Option<TTEntry> {
        let found = self.table.get(&hash).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Inserts unconditionally on the same hash; clears the whole table
    /// first if it would otherwise grow past capacity. Preserved as
    /// specified rather than switched to always-replace/depth-preferred.
    pub fn insert(&mut self, hash: u64, entry: TTEntry) {
        if self.table.len() >= self.capacity && !self.table.contains_key(&hash) {
            self.table.clear();
        }
        self.table.insert(hash, entry);
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn reset_counters(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.reset_counters();
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::types::Move;

    #[test]
    fn insert_then_get_round_trips() {
        let mut tt = TranspositionTable::new();
        let entry = TTEntry {
            node_type: NodeType::Exact,
            best_move: Move::null(),
            score: 42,
            depth: 3,
            age: 0,
        };
        tt.insert(7, entry);
        let got = tt.get(7).unwrap();
        assert_eq!(got.score, 42);
        assert_eq!(tt.hits(), 1);
        assert_eq!(tt.misses(), 0);
    }

    #[test]
    fn miss_counts_separately() {
        let mut tt = TranspositionTable::new();
        assert!(tt.get(99).is_none());
        assert_eq!(tt.misses(), 1);
    }
}
