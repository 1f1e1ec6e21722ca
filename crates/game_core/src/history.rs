use serde::{Deserialize, Serialize};

use crate::types::Square;

/// One committed move: origin and destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
}

/// Append-only log of committed moves, in chronological order.
///
/// The special-move detector reads the tail of this log, and castling
/// rights are derived from it: a king or rook that has ever appeared as
/// an origin square has moved, whatever its current square.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, from: Square, to: Square) {
        self.entries.push(MoveRecord { from, to });
    }

    pub fn last(&self) -> Option<MoveRecord> {
        self.entries.last().copied()
    }

    /// The last two entries, most recent last. `None` before two moves
    /// have been committed.
    pub fn last_two(&self) -> Option<(MoveRecord, MoveRecord)> {
        let n = self.entries.len();
        if n < 2 {
            return None;
        }
        Some((self.entries[n - 2], self.entries[n - 1]))
    }

    /// Has any move ever originated from `sq`?
    pub fn has_departed(&self, sq: Square) -> bool {
        self.entries.iter().any(|r| r.from == sq)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MoveRecord> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
