//! Tournament time-machine API client.
//!
//! Endpoint: `{base_url}/table/{id}/gameround/-1` returns the last round
//! played at a table. If the table has not been posted yet the server
//! answers with the most recent table it does have, so the caller must
//! compare `tableCounter` against the requested id.
//! Auth: none.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::TableSource;
use crate::config::SourceConfig;
use crate::error::ScoutError;
use crate::types::{TableId, TableSnapshot};

const SOURCE_NAME: &str = "timemachine";

/// Build the round URL for one table. A trailing `/` on `base` is ignored.
pub fn table_url(base: &str, table_id: TableId) -> String {
    format!("{}/table/{table_id}/gameround/-1", base.trim_end_matches('/'))
}

/// HTTP client for the time-machine endpoint.
pub struct TimeMachineClient {
    http: Client,
    base_url: String,
}

impl TimeMachineClient {
    pub fn new(cfg: &SourceConfig) -> Result<Self, ScoutError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| ScoutError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.clone(),
        })
    }
}

/// Decode a response body for `table_id`.
pub fn decode_snapshot(table_id: TableId, body: &str) -> Result<TableSnapshot, ScoutError> {
    serde_json::from_str(body).map_err(|source| ScoutError::Decode { table_id, source })
}

#[async_trait]
impl TableSource for TimeMachineClient {
    async fn fetch_table(&self, table_id: TableId) -> Result<TableSnapshot, ScoutError> {
        let url = table_url(&self.base_url, table_id);
        debug!(url = %url, "Fetching table");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| ScoutError::Http { table_id, source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScoutError::Status { table_id, status });
        }

        let body = resp
            .text()
            .await
            .map_err(|source| ScoutError::Http { table_id, source })?;

        decode_snapshot(table_id, &body)
    }

    fn name(&self) -> &'static str {
        SOURCE_NAME
    }
}
