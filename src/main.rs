//! TABLESCOUT: poker-bot tournament scraper and leaderboard
//!
//! Entry point. Loads configuration, initialises structured logging,
//! and runs the poll → account → report loop until a fetch fails or
//! the process is interrupted.

use anyhow::Result;
use tracing::{error, info};

use tablescout::config::{self, ScoutConfig};
use tablescout::engine::scraper::Scraper;
use tablescout::source::timemachine::TimeMachineClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    init_logging();

    let cfg = ScoutConfig::load_or_default(config::DEFAULT_CONFIG_FILE)?;
    info!(
        base_url = %cfg.source.base_url,
        initial_table_id = cfg.source.initial_table_id,
        ignored = cfg.players.ignore.len(),
        slow_backoff_secs = cfg.polling.slow_backoff_secs,
        "TABLESCOUT starting up"
    );

    let client = TimeMachineClient::new(&cfg.source)?;
    let mut scraper = Scraper::new(cfg, client);

    println!("Starting scrape...");

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let result = tokio::select! {
        res = scraper.run() => res,
        _ = &mut shutdown => {
            info!("Shutdown signal received.");
            Ok(())
        }
    };

    info!(
        next_table_id = scraper.table_id(),
        players = scraper.ledger().len(),
        "TABLESCOUT stopped"
    );

    if let Err(e) = result {
        error!(error = %e, table_id = ?e.table_id(), "Scrape loop failed, stopping");
        return Err(e.into());
    }

    Ok(())
}

/// Initialise the `tracing` subscriber. Logs go to stderr so the
/// leaderboard on stdout stays readable.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tablescout=info"));

    let json_logging = std::env::var("TABLESCOUT_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
