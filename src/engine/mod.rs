//! Core engine: the poll → account → report loop.

pub mod poller;
pub mod scraper;
