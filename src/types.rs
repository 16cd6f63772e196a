//! Shared types for TABLESCOUT.
//!
//! Wire types mirror the time-machine JSON payload; domain types describe
//! per-player outcomes and the result of a single poll.

use serde::Deserialize;
use std::fmt;

/// Monotonically increasing table identifier on the remote server.
pub type TableId = u64;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Final game round of one table, as returned by
/// `/table/{id}/gameround/-1`. Only the fields we use are deserialized.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    /// The table the server actually answered with.
    pub table_counter: TableId,
    /// True once the round returned is the table's final game.
    #[serde(default)]
    pub last_game: bool,
    #[serde(default)]
    pub players: Vec<PlayerResult>,
}

/// One seat's result at the end of a table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResult {
    pub name: String,
    pub chips_after_game: i64,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Classification of a player's final chip count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finished holding every chip at the table.
    Win,
    /// Busted out with zero chips.
    Loss,
    /// Anything else: disconnected, timed out, or otherwise left early.
    Fault,
}

impl Outcome {
    /// Classify a final chip count against the table's total chip supply.
    pub fn from_chips(chips: i64, win_chips: i64) -> Self {
        if chips == win_chips {
            Outcome::Win
        } else if chips == 0 {
            Outcome::Loss
        } else {
            Outcome::Fault
        }
    }

    /// Value appended to a player's history, if any.
    pub fn history_score(&self) -> Option<u8> {
        match self {
            Outcome::Win => Some(100),
            Outcome::Loss => Some(0),
            Outcome::Fault => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Loss => write!(f, "LOSS"),
            Outcome::Fault => write!(f, "FAULT"),
        }
    }
}

// ---------------------------------------------------------------------------
// Poll results
// ---------------------------------------------------------------------------

/// Why a table could not be processed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// The server answered with an older table; ours is not posted yet.
    NotPosted { counter: TableId },
    /// The table exists but its last game has not finished.
    Unfinished,
}

/// Decision taken for one requested table id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The server is already past this id. Advance without accounting.
    Skip,
    /// Not ready. Keep the same id and back off.
    Retry(RetryReason),
    /// Finished table, players accounted. Advance and report.
    Processed,
}

impl PollOutcome {
    /// Whether the table id moves forward after this outcome.
    pub fn advances(&self) -> bool {
        !matches!(self, PollOutcome::Retry(_))
    }
}

impl fmt::Display for PollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollOutcome::Skip => write!(f, "skip"),
            PollOutcome::Retry(RetryReason::NotPosted { counter }) => {
                write!(f, "retry (server at #{counter})")
            }
            PollOutcome::Retry(RetryReason::Unfinished) => write!(f, "retry (unfinished)"),
            PollOutcome::Processed => write!(f, "processed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
