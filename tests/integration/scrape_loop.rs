//! End-to-end scrape loop scenarios.

use std::io::{self, Write};
use std::time::Duration;

use tablescout::config::ScoutConfig;
use tablescout::engine::scraper::Scraper;
use tablescout::error::ScoutError;
use tablescout::types::PollOutcome;

use crate::scripted_source::{finished, unfinished, ScriptedSource};

const WIN: i64 = 60000;

#[tokio::test(start_paused = true)]
async fn test_run_walks_tables_until_fetch_fails() {
    let script = vec![
        finished(899, &[("Alice", WIN)]), // 900 not posted yet
        unfinished(900),                  // posted, still playing
        finished(900, &[("Alice", WIN), ("Bob", 0), ("Raiser", 0)]),
        finished(902, &[("Alice", 0)]), // 901 superseded
        finished(902, &[("Alice", 0), ("Bob", WIN)]),
    ];
    let source = ScriptedSource::new(script);
    let requests = source.requests();
    let mut scraper = Scraper::new(ScoutConfig::default(), source);

    let err = scraper.run().await.unwrap_err();
    assert!(matches!(err, ScoutError::Status { table_id: 903, .. }));

    assert_eq!(*requests.lock().unwrap(), vec![900, 900, 900, 901, 902, 903]);

    let ledger = scraper.ledger();
    assert_eq!(ledger.len(), 2);
    assert!(ledger.get("Raiser").is_none());

    let alice = ledger.get("Alice").unwrap();
    assert_eq!((alice.first_seen, alice.last_seen), (900, 902));
    assert_eq!((alice.wins, alice.losses, alice.faults), (1, 1, 0));
    assert_eq!(alice.history, vec![100, 0]);

    let bob = ledger.get("Bob").unwrap();
    assert_eq!(bob.history, vec![0, 100]);
    assert_eq!(scraper.table_id(), 903);
}

fn quick_backoff_config(slow_backoff_secs: u64) -> ScoutConfig {
    let mut cfg = ScoutConfig::default();
    cfg.polling.slow_backoff_secs = slow_backoff_secs;
    cfg
}

#[tokio::test(start_paused = true)]
async fn test_backoff_and_quick_retry_timing() {
    let script = vec![
        finished(899, &[]), // retry: full slow back-off
        finished(901, &[]), // skip: quick retry only
    ];
    let mut scraper = Scraper::new(quick_backoff_config(7), ScriptedSource::new(script));
    let mut out: Vec<u8> = Vec::new();

    let start = tokio::time::Instant::now();
    let err = scraper.run_with(&mut out).await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, ScoutError::Status { table_id: 901, .. }));
    assert!(elapsed >= Duration::from_millis(7100), "elapsed {elapsed:?}");
    assert!(elapsed < Duration::from_millis(7150), "elapsed {elapsed:?}");

    let expected: String = (0..7)
        .map(|s| format!("{s:>5}/{:<5}\r", 7))
        .chain(std::iter::once("\n".to_string()))
        .collect();
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[tokio::test(start_paused = true)]
async fn test_reports_written_after_countdown() {
    let script = vec![
        finished(899, &[]),
        finished(900, &[("Alice", WIN)]),
    ];
    let mut scraper = Scraper::new(quick_backoff_config(2), ScriptedSource::new(script));
    let mut out: Vec<u8> = Vec::new();

    let start = tokio::time::Instant::now();
    scraper.run_with(&mut out).await.unwrap_err();
    assert!(start.elapsed() >= Duration::from_millis(2100));

    let text = String::from_utf8(out).unwrap();
    let (countdown, report) = text.split_once('\n').unwrap();
    assert_eq!(countdown, "    0/2    \r    1/2    \r");
    assert!(report.starts_with("#900\nAlice."));
    assert!(report.ends_with(" <--\n\n"));
}

/// Writer whose every write fails, like a closed pipe.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn test_write_failure_stops_report_path() {
    let script = vec![finished(900, &[("Alice", WIN)]), finished(901, &[])];
    let source = ScriptedSource::new(script);
    let requests = source.requests();
    let mut scraper = Scraper::new(ScoutConfig::default(), source);

    let err = scraper.run_with(&mut ClosedPipe).await.unwrap_err();
    assert!(matches!(err, ScoutError::Output(_)));
    assert_eq!(*requests.lock().unwrap(), vec![900]);
    assert_eq!(scraper.ledger().get("Alice").unwrap().wins, 1);
}

#[tokio::test(start_paused = true)]
async fn test_write_failure_stops_backoff_path() {
    let script = vec![finished(899, &[])];
    let mut scraper = Scraper::new(quick_backoff_config(3), ScriptedSource::new(script));

    let start = tokio::time::Instant::now();
    let err = scraper.run_with(&mut ClosedPipe).await.unwrap_err();
    assert!(matches!(err, ScoutError::Output(_)));
    // Fails on the first countdown redraw, after one second.
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(scraper.table_id(), 900);
}

#[test]
fn test_poll_outcomes_in_sequence() {
    let script = vec![
        finished(901, &[]),
        finished(901, &[("Carol", 12345)]),
    ];
    let mut scraper = Scraper::new(ScoutConfig::default(), ScriptedSource::new(script));

    let skip = tokio_test::block_on(scraper.poll_once()).unwrap();
    assert_eq!(skip.outcome, PollOutcome::Skip);
    assert!(skip.report.is_none());

    let processed = tokio_test::block_on(scraper.poll_once()).unwrap();
    assert_eq!(processed.outcome, PollOutcome::Processed);
    let report = processed.report.unwrap();
    assert!(report.text.starts_with("#901\n"));
    assert!(report.text.contains("<--"));

    let carol = scraper.ledger().get("Carol").unwrap();
    assert_eq!(carol.faults, 1);
    assert!(carol.history.is_empty());
    assert_eq!(carol.last_seen, 901);
}

#[tokio::test]
async fn test_show_all_latch_through_scraper() {
    let regulars: Vec<String> = (0..10).map(|i| format!("Bot{i:02}")).collect();
    let mut script = Vec::new();
    for t in 0..6u64 {
        let mut players: Vec<(&str, i64)> = regulars.iter().map(|n| (n.as_str(), WIN)).collect();
        if t == 0 {
            players.push(("OneTimer", 0));
        }
        script.push(finished(900 + t, &players));
    }
    let mut scraper = Scraper::new(ScoutConfig::default(), ScriptedSource::new(script));

    for _ in 0..4 {
        let step = scraper.poll_once().await.unwrap();
        assert_eq!(step.report.unwrap().established, 0);
        assert!(scraper.leaderboard().show_all());
    }

    // Fifth table: every regular reaches five results.
    let fifth = scraper.poll_once().await.unwrap().report.unwrap();
    assert_eq!(fifth.established, 10);
    assert_eq!(fifth.rows_shown, 11);
    assert!(!scraper.leaderboard().show_all());

    let sixth = scraper.poll_once().await.unwrap().report.unwrap();
    assert_eq!(sixth.rows_shown, 10);
    assert!(!sixth.text.contains("OneTimer"));
}

#[tokio::test]
async fn test_same_feed_ranks_identically() {
    let feed = || {
        vec![
            finished(900, &[("A", WIN), ("B", 0)]),
            finished(901, &[("A", 0), ("B", WIN), ("C", 0)]),
            finished(902, &[("C", WIN), ("B", 0)]),
        ]
    };
    let mut first = Scraper::new(ScoutConfig::default(), ScriptedSource::new(feed()));
    let mut second = Scraper::new(ScoutConfig::default(), ScriptedSource::new(feed()));

    let mut texts = Vec::new();
    for _ in 0..3 {
        let a = first.poll_once().await.unwrap().report.unwrap();
        let b = second.poll_once().await.unwrap().report.unwrap();
        assert_eq!(a.text, b.text);
        texts.push(a.text);
    }
    assert!(texts[2].starts_with("#902\n"));
}
