//! Poll classification.
//!
//! Decides, from the server's answer for one requested table id, whether
//! the table can be accounted, should be skipped, or must be retried later.

use crate::types::{PollOutcome, RetryReason, TableId, TableSnapshot};

/// Classify the response to a request for `requested`.
///
/// - counter ahead of the request: the server has moved past it → `Skip`
/// - counter behind: not posted yet → `Retry`
/// - same table, last game not finished → `Retry`
/// - same table, finished → `Processed`
pub fn classify(requested: TableId, snapshot: &TableSnapshot) -> PollOutcome {
    let counter = snapshot.table_counter;
    if counter > requested {
        PollOutcome::Skip
    } else if counter < requested {
        PollOutcome::Retry(RetryReason::NotPosted { counter })
    } else if !snapshot.last_game {
        PollOutcome::Retry(RetryReason::Unfinished)
    } else {
        PollOutcome::Processed
    }
}
