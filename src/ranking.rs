//! Recency-weighted ranking.
//!
//! A player's recent score is the win percentage over the trailing window
//! of their history, with a 95% normal-approximation confidence half-width.
//! Players are ranked by the lower bound of that interval. Players without
//! enough history form a separate, lower tier ranked by lifetime win rate.

use std::cmp::Ordering;

use crate::config::RankingConfig;
use crate::ledger::{Ledger, PlayerRecord};

/// z-score for a two-sided 95% interval.
const Z_95: f64 = 1.96;

// ---------------------------------------------------------------------------
// Recent score
// ---------------------------------------------------------------------------

/// Win percentage over the trailing history window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentScore {
    /// Mean of the window, 0–100.
    pub recent: f64,
    /// 95% confidence half-width, in percentage points.
    pub error: f64,
    /// Number of history entries the score was computed over.
    pub window: usize,
}

impl RecentScore {
    /// Conservative score: the lower end of the confidence interval.
    pub fn lower_bound(&self) -> f64 {
        self.recent - self.error
    }
}

/// Score the last `recent_max_length` history entries, or `None` if the
/// player has fewer than `recent_min_length`.
pub fn compute_recent(record: &PlayerRecord, params: &RankingConfig) -> Option<RecentScore> {
    let history = &record.history;
    if history.len() < params.recent_min_length {
        return None;
    }

    let start = history.len().saturating_sub(params.recent_max_length);
    let window = &history[start..];
    let n = window.len() as f64;

    let recent = window.iter().map(|&v| v as f64).sum::<f64>() / n;
    let error = Z_95 * (recent * (100.0 - recent) / n).max(0.0).sqrt();

    Some(RecentScore {
        recent,
        error,
        window: window.len(),
    })
}

// ---------------------------------------------------------------------------
// Rank key
// ---------------------------------------------------------------------------

/// Sort key for the leaderboard.
///
/// Every `Established` key outranks every `Sparse` key regardless of value;
/// the two scales (percent bound vs. 0–1 rate) are never compared.
#[derive(Debug, Clone, Copy)]
pub enum RankKey {
    /// Enough history: `recent - error`.
    Established(f64),
    /// Too little history: lifetime `wins / (wins + losses + faults)`.
    Sparse(f64),
}

impl RankKey {
    #[cfg(test)]
    fn for_record(record: &PlayerRecord, params: &RankingConfig) -> Self {
        Self::from_score(record, compute_recent(record, params).as_ref())
    }

    fn from_score(record: &PlayerRecord, recent: Option<&RecentScore>) -> Self {
        match recent {
            Some(score) => RankKey::Established(score.lower_bound()),
            None => RankKey::Sparse(record.win_rate()),
        }
    }

    #[cfg(test)]
    fn value(&self) -> f64 {
        match self {
            RankKey::Established(v) | RankKey::Sparse(v) => *v,
        }
    }

    pub fn is_established(&self) -> bool {
        matches!(self, RankKey::Established(_))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RankKey::Established(a), RankKey::Established(b))
            | (RankKey::Sparse(a), RankKey::Sparse(b)) => a.total_cmp(b),
            (RankKey::Established(_), RankKey::Sparse(_)) => Ordering::Greater,
            (RankKey::Sparse(_), RankKey::Established(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RankKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankKey {}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// One ranked leaderboard entry.
#[derive(Debug, Clone)]
pub struct RankedPlayer<'a> {
    pub record: &'a PlayerRecord,
    pub key: RankKey,
    pub recent: Option<RecentScore>,
}

/// All ledger records, best first. Ties keep first-observation order.
pub fn rank<'a>(ledger: &'a Ledger, params: &RankingConfig) -> Vec<RankedPlayer<'a>> {
    let mut ranked: Vec<RankedPlayer<'a>> = ledger
        .iter()
        .map(|record| {
            let recent = compute_recent(record, params);
            let key = RankKey::from_score(record, recent.as_ref());
            RankedPlayer { record, key, recent }
        })
        .collect();

    // Stable: equal keys stay in ledger order.
    ranked.sort_by(|a, b| b.key.cmp(&a.key));
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
