//! Leaderboard rendering.
//!
//! Produces the console snapshot printed after every processed table and
//! owns the one-way "show all" latch that hides sparse-data players once
//! enough players have real statistics.

use chrono::{DateTime, Utc};
use std::fmt;
use tracing::info;

use crate::config::RankingConfig;
use crate::ledger::Ledger;
use crate::ranking::{rank, RankedPlayer, RecentScore};
use crate::types::TableId;

/// Width the player name is dot-padded to.
const NAME_WIDTH: usize = 60;

/// Shown in the score column when a player has too little history.
const NO_SCORE: &str = " - - - - - ";

/// Marks players who sat at the table that triggered the report.
const LAST_TABLE_MARKER: &str = "<--";

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// One rendered leaderboard snapshot.
#[derive(Debug, Clone)]
pub struct Report {
    /// The completed table that triggered this report.
    pub table_id: TableId,
    /// Header, ranked rows and trailing blank line.
    pub text: String,
    pub rows_shown: usize,
    /// Players with a recent score this round.
    pub established: usize,
    pub generated_at: DateTime<Utc>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

pub struct Leaderboard {
    params: RankingConfig,
    show_all: bool,
}

impl Leaderboard {
    pub fn new(params: RankingConfig) -> Self {
        Self {
            params,
            show_all: true,
        }
    }

    /// Whether sparse-data players are still listed.
    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Render the full ledger, ranked, for the table just completed.
    ///
    /// Once a round counts `show_all_limit` established players, sparse
    /// players are hidden from this point on, even if the count drops later.
    pub fn render(&mut self, ledger: &Ledger, completed_table: TableId) -> Report {
        let mut text = format!("#{completed_table}\n");
        let mut rows_shown = 0;
        let mut established = 0;

        for entry in rank(ledger, &self.params) {
            if entry.key.is_established() {
                established += 1;
            } else if !self.show_all {
                continue;
            }
            text.push_str(&render_row(&entry, completed_table));
            text.push('\n');
            rows_shown += 1;
        }
        text.push('\n');

        if self.show_all && established >= self.params.show_all_limit {
            self.show_all = false;
            info!(
                established,
                limit = self.params.show_all_limit,
                table_id = completed_table,
                "Enough established players, hiding sparse players from now on"
            );
        }

        Report {
            table_id: completed_table,
            text,
            rows_shown,
            established,
            generated_at: Utc::now(),
        }
    }
}

/// Format one leaderboard row.
fn render_row(entry: &RankedPlayer<'_>, completed_table: TableId) -> String {
    let r = entry.record;
    let marker = if r.last_seen == completed_table {
        LAST_TABLE_MARKER
    } else {
        ""
    };
    format!(
        "{:.<width$} {:>4} {:>4} {:>3} {:>3} {:>3} {:>11} {}",
        r.name,
        r.first_seen,
        r.last_seen,
        r.wins,
        r.losses,
        r.faults,
        format_score(entry.recent.as_ref()),
        marker,
        width = NAME_WIDTH,
    )
}

/// `" 60% ±42.9%"`, or a placeholder when there is no recent score.
pub fn format_score(score: Option<&RecentScore>) -> String {
    match score {
        Some(s) => format!("{:3.0}% ±{:4.1}%", s.recent, s.error),
        None => NO_SCORE.to_string(),
    }
}

/// Back-off progress indicator, e.g. `"   12/300  "`.
pub fn countdown_line(second: u64, total: u64) -> String {
    format!("{second:>5}/{total:<5}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
