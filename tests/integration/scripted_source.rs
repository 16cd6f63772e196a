//! Scripted table source for integration testing.
//!
//! Replays a fixed queue of responses in order and records every table id
//! requested. Once the script runs out every fetch fails, which ends
//! `Scraper::run`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tablescout::error::ScoutError;
use tablescout::source::TableSource;
use tablescout::types::{PlayerResult, TableId, TableSnapshot};

pub struct ScriptedSource {
    script: Mutex<VecDeque<TableSnapshot>>,
    requests: Arc<Mutex<Vec<TableId>>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<TableSnapshot>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the request log, readable after the source is moved.
    pub fn requests(&self) -> Arc<Mutex<Vec<TableId>>> {
        Arc::clone(&self.requests)
    }
}

#[async_trait]
impl TableSource for ScriptedSource {
    async fn fetch_table(&self, table_id: TableId) -> Result<TableSnapshot, ScoutError> {
        self.requests.lock().unwrap().push(table_id);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ScoutError::Status {
                table_id,
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// Snapshot builders
// ---------------------------------------------------------------------------

pub fn finished(counter: TableId, players: &[(&str, i64)]) -> TableSnapshot {
    TableSnapshot {
        table_counter: counter,
        last_game: true,
        players: players
            .iter()
            .map(|&(name, chips)| PlayerResult {
                name: name.to_string(),
                chips_after_game: chips,
            })
            .collect(),
    }
}

pub fn unfinished(counter: TableId) -> TableSnapshot {
    TableSnapshot {
        table_counter: counter,
        last_game: false,
        players: Vec::new(),
    }
}
