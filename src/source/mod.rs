//! Table data sources.
//!
//! Defines the `TableSource` trait the scrape loop polls, and the
//! HTTP implementation against the tournament time-machine API.

pub mod timemachine;

use async_trait::async_trait;

use crate::error::ScoutError;
use crate::types::{TableId, TableSnapshot};

/// Abstraction over wherever finished tables come from.
///
/// One call per poll: no retries, no caching. Errors propagate to the
/// scrape loop unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Fetch the final game round of `table_id`.
    async fn fetch_table(&self, table_id: TableId) -> Result<TableSnapshot, ScoutError>;

    /// Source name for logging.
    fn name(&self) -> &'static str;
}
