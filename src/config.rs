//! Startup configuration.
//!
//! Every value has a built-in default matching the production tournament
//! server. An optional `tablescout.toml` in the working directory may
//! override any subset of fields; values are fixed once the loop starts.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::error::ScoutError;
use crate::types::TableId;

/// Default config file looked up by the binary.
pub const DEFAULT_CONFIG_FILE: &str = "tablescout.toml";

/// Top-level configuration.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScoutConfig {
    pub source: SourceConfig,
    pub players: PlayersConfig,
    pub ranking: RankingConfig,
    pub polling: PollingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL; table requests go to `{base_url}/table/{id}/gameround/-1`.
    pub base_url: String,
    /// First table id to request.
    pub initial_table_id: TableId,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://poker.cygni.se/timemachine".to_string(),
            initial_table_id: 900,
            timeout_secs: 30,
            user_agent: "TABLESCOUT/0.1.0 (leaderboard-scraper)".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayersConfig {
    /// House bots excluded from the ledger, matched by exact name.
    pub ignore: Vec<String>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            ignore: ["Cautious", "Raiser", "Weighted", "Sensible", "Hellmuth"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl PlayersConfig {
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|n| n == name)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RankingConfig {
    /// Fewer history entries than this → no recent score.
    pub recent_min_length: usize,
    /// Size of the trailing window the recent score is computed over.
    pub recent_max_length: usize,
    /// Established players needed in one round to hide sparse players for good.
    pub show_all_limit: usize,
    /// Final chip count that counts as a win (all chips at the table).
    pub win_chips: i64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            recent_min_length: 5,
            recent_max_length: 50,
            show_all_limit: 10,
            win_chips: 60000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PollingConfig {
    /// Pause after an advancing poll.
    pub quick_retry_ms: u64,
    /// Total back-off when the table is not ready, slept one second at a time.
    pub slow_backoff_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            quick_retry_ms: 100,
            slow_backoff_secs: 300,
        }
    }
}

impl PollingConfig {
    pub fn quick_retry(&self) -> Duration {
        Duration::from_millis(self.quick_retry_ms)
    }
}

impl ScoutConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: ScoutConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using built-in defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Reject combinations the scrape loop cannot run with.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.source.base_url.trim().is_empty() {
            return Err(ScoutError::Config("source.base_url is empty".into()));
        }
        if self.ranking.recent_min_length == 0 {
            return Err(ScoutError::Config(
                "ranking.recent_min_length must be at least 1".into(),
            ));
        }
        if self.ranking.recent_max_length < self.ranking.recent_min_length {
            return Err(ScoutError::Config(format!(
                "ranking.recent_max_length ({}) is below recent_min_length ({})",
                self.ranking.recent_max_length, self.ranking.recent_min_length
            )));
        }
        if self.polling.slow_backoff_secs == 0 {
            return Err(ScoutError::Config(
                "polling.slow_backoff_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
