//! Domain-specific error types for TABLESCOUT.

use crate::types::TableId;

/// Everything that can go wrong below the binary's top level.
///
/// Fetch-side variants are fatal to the scrape loop: they are not folded
/// into the normal back-off path.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    #[error("HTTP request for table #{table_id} failed: {source}")]
    Http {
        table_id: TableId,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned {status} for table #{table_id}")]
    Status {
        table_id: TableId,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode table #{table_id}: {source}")]
    Decode {
        table_id: TableId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write leaderboard output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScoutError {
    /// Table the failing request was for, if the error came from a fetch.
    pub fn table_id(&self) -> Option<TableId> {
        match self {
            ScoutError::Http { table_id, .. }
            | ScoutError::Status { table_id, .. }
            | ScoutError::Decode { table_id, .. } => Some(*table_id),
            ScoutError::Output(_) | ScoutError::Config(_) => None,
        }
    }
}
