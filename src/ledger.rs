//! Player ledger: accumulated per-player outcome history.
//!
//! One `PlayerRecord` per distinct name, created on first observation and
//! mutated in place afterwards. Records are never removed. Iteration order
//! is first-observation order.

use std::collections::HashMap;
use tracing::debug;

use crate::types::{Outcome, TableId};

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// Lifetime statistics for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    /// Table at which the player was first observed. Never changes.
    pub first_seen: TableId,
    /// Table of the most recent observation.
    pub last_seen: TableId,
    pub wins: u32,
    pub losses: u32,
    pub faults: u32,
    /// Chronological outcome scores: 100 per win, 0 per loss. Faults are
    /// not recorded here, so `history.len() == wins + losses`.
    pub history: Vec<u8>,
}

impl PlayerRecord {
    fn new(name: &str, table_id: TableId) -> Self {
        Self {
            name: name.to_string(),
            first_seen: table_id,
            last_seen: table_id,
            wins: 0,
            losses: 0,
            faults: 0,
            history: Vec::new(),
        }
    }

    /// Total number of tables this player was observed at.
    pub fn observations(&self) -> u32 {
        self.wins + self.losses + self.faults
    }

    /// Lifetime win rate (0.0–1.0) with faults counted in the denominator.
    pub fn win_rate(&self) -> f64 {
        match self.observations() {
            0 => 0.0,
            n => self.wins as f64 / n as f64,
        }
    }

    fn record(&mut self, table_id: TableId, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Fault => self.faults += 1,
        }
        if let Some(score) = outcome.history_score() {
            self.history.push(score);
        }
        self.last_seen = table_id;
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// All players seen during this process, in first-observation order.
#[derive(Debug, Clone)]
pub struct Ledger {
    records: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
    win_chips: i64,
}

impl Ledger {
    /// Create an empty ledger. `win_chips` is the chip count classified as a win.
    pub fn new(win_chips: i64) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            win_chips,
        }
    }

    /// Absorb one player's result from a completed table.
    ///
    /// Chip counts that are neither `win_chips` nor zero are classified as
    /// faults; this never fails.
    pub fn observe(&mut self, table_id: TableId, name: &str, chips: i64) -> Outcome {
        let outcome = Outcome::from_chips(chips, self.win_chips);

        let slot = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.records.push(PlayerRecord::new(name, table_id));
                let i = self.records.len() - 1;
                self.index.insert(name.to_string(), i);
                debug!(player = name, table_id, "New player");
                i
            }
        };

        self.records[slot].record(table_id, outcome);

        if outcome == Outcome::Fault {
            debug!(player = name, table_id, chips, "Unexpected chip count, recorded as fault");
        }

        outcome
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-observation order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
