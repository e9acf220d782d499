//! Standalone daily rollover daemon.
//!
//! Opens the CSV store configured for the current directory, runs the
//! midnight rollover scheduler, and shuts it down on Ctrl-C.

use daily_todos::config::AppConfig;
use daily_todos::rollover::RolloverScheduler;
use daily_todos::store::CsvStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_dir = std::env::current_dir()?;

    let config = AppConfig::load_from(&base_dir)?.unwrap_or_default();
    let store = CsvStore::new(config.resolved_data_dir(&base_dir))?;
    eprintln!("Rollover scheduler started (data dir: {})", store.data_dir().display());

    let scheduler = RolloverScheduler::start(store);

    tokio::signal::ctrl_c().await?;
    scheduler.stop();
    // Give the background task a moment to log its shutdown event.
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    Ok(())
}
