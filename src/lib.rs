//! TABLESCOUT: poker-bot tournament scraper and leaderboard
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod error;
pub mod types;
pub mod source;
pub mod ledger;
pub mod ranking;
pub mod report;
pub mod engine;
