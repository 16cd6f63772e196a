//! Scrape loop.
//!
//! `Scraper` owns all mutable state for a run: the ledger, the leaderboard
//! latch and the next table id to request. It polls strictly sequentially;
//! a finished table is accounted and reported, an out-of-date one is
//! skipped, and anything not ready yet triggers the slow back-off.

use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

use super::poller::classify;
use crate::config::ScoutConfig;
use crate::error::ScoutError;
use crate::ledger::Ledger;
use crate::report::{countdown_line, Leaderboard, Report};
use crate::source::TableSource;
use crate::types::{PollOutcome, TableId};

// ---------------------------------------------------------------------------
// Step report
// ---------------------------------------------------------------------------

/// Result of one poll.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// The table id that was requested.
    pub table_id: TableId,
    pub outcome: PollOutcome,
    /// Players fed into the ledger (ignored names excluded).
    pub players_observed: usize,
    /// Present only for `Processed`.
    pub report: Option<Report>,
}

// ---------------------------------------------------------------------------
// Scraper
// ---------------------------------------------------------------------------

pub struct Scraper<S> {
    config: ScoutConfig,
    source: S,
    ledger: Ledger,
    leaderboard: Leaderboard,
    table_id: TableId,
}

impl<S: TableSource> Scraper<S> {
    pub fn new(config: ScoutConfig, source: S) -> Self {
        Self {
            ledger: Ledger::new(config.ranking.win_chips),
            leaderboard: Leaderboard::new(config.ranking),
            table_id: config.source.initial_table_id,
            config,
            source,
        }
    }

    /// Next table id to request.
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    /// Fetch the current table once and act on the answer.
    ///
    /// Fetch failures are returned as-is; state is untouched in that case.
    pub async fn poll_once(&mut self) -> Result<StepReport, ScoutError> {
        let table_id = self.table_id;
        let snapshot = self.source.fetch_table(table_id).await?;
        let outcome = classify(table_id, &snapshot);

        debug!(
            source = self.source.name(),
            table_id,
            counter = snapshot.table_counter,
            last_game = snapshot.last_game,
            outcome = %outcome,
            "Table polled"
        );

        let mut players_observed = 0;
        let mut report = None;

        if outcome == PollOutcome::Processed {
            for player in &snapshot.players {
                if self.config.players.is_ignored(&player.name) {
                    continue;
                }
                self.ledger
                    .observe(table_id, &player.name, player.chips_after_game);
                players_observed += 1;
            }

            let rendered = self.leaderboard.render(&self.ledger, table_id);
            info!(
                table_id,
                players = players_observed,
                ignored = snapshot.players.len() - players_observed,
                tracked = self.ledger.len(),
                established = rendered.established,
                generated_at = %rendered.generated_at.to_rfc3339(),
                "Table processed"
            );
            report = Some(rendered);
        }

        if outcome.advances() {
            self.table_id += 1;
        }

        Ok(StepReport {
            table_id,
            outcome,
            players_observed,
            report,
        })
    }

    /// Poll forever, writing reports and the back-off countdown to stdout.
    /// Returns only when a fetch or a write fails.
    pub async fn run(&mut self) -> Result<(), ScoutError> {
        let mut stdout = std::io::stdout();
        self.run_with(&mut stdout).await
    }

    /// `run` against any writer.
    pub async fn run_with<W: Write>(&mut self, out: &mut W) -> Result<(), ScoutError> {
        info!(
            source = self.source.name(),
            table_id = self.table_id,
            "Starting scrape"
        );

        loop {
            let step = self.poll_once().await?;
            match step.outcome {
                PollOutcome::Processed | PollOutcome::Skip => {
                    if let Some(report) = &step.report {
                        write!(out, "{report}")?;
                        out.flush()?;
                    }
                    tokio::time::sleep(self.config.polling.quick_retry()).await;
                }
                PollOutcome::Retry(reason) => {
                    debug!(table_id = step.table_id, ?reason, "Table not ready, backing off");
                    self.back_off(out).await?;
                }
            }
        }
    }

    /// Sleep the slow back-off one second at a time, redrawing a countdown
    /// in place, then end the line.
    async fn back_off<W: Write>(&self, out: &mut W) -> Result<(), ScoutError> {
        let total = self.config.polling.slow_backoff_secs;
        for second in 0..total {
            tokio::time::sleep(Duration::from_secs(1)).await;
            write!(out, "{}\r", countdown_line(second, total))?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
