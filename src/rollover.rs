//! The midnight rollover: archive today's counts, then clear completion flags.
//!
//! The scheduler sleeps until the next local midnight, fires, and then
//! repeats on a fixed 24-hour interval. Because the repeat is not re-anchored
//! to midnight, the firing time drifts across DST and other leap-time
//! discontinuities — a known limitation, not corrected.

use crate::history::HistoryService;
use crate::rollover_logging::log_rollover_event;
use crate::store::{CsvStore, RecordStore};
use crate::tasks::TaskService;
use chrono::{NaiveDateTime, NaiveTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Seconds in the fixed repeat interval.
const DAY_SECS: u64 = 24 * 60 * 60;

/// How long to sleep before the first firing: next midnight minus `now`.
#[must_use]
pub fn delay_until_midnight(now: NaiveDateTime) -> Duration {
    let Some(next_midnight) = now.date().succ_opt().map(|d| d.and_time(NaiveTime::MIN)) else {
        // Only reachable at the end of chrono's date range.
        return Duration::from_secs(DAY_SECS);
    };
    (next_midnight - now).to_std().unwrap_or(Duration::from_secs(DAY_SECS))
}

/// Run one rollover firing: archive today's statistics, then reset all tasks.
///
/// The two steps are deliberately not transactional: the reset runs even when
/// the archive step failed, matching the crash-tolerance posture of the rest
/// of the store (a crash between the steps can leave history written but
/// tasks not yet reset).
///
/// # Errors
///
/// Returns the archive error if that step failed, otherwise any reset error.
pub fn run_rollover<S: RecordStore>(
    tasks: &TaskService<S>,
    history: &HistoryService<S>,
) -> crate::error::Result<()> {
    let archived = history.archive_today().map(|_| ());
    let reset = tasks.reset_all();
    archived.and(reset)
}

/// Process-scoped handle for the daily rollover job.
///
/// `start` spawns the background task; `stop` disables further firings. An
/// in-flight firing is not interrupted.
#[derive(Debug)]
pub struct RolloverScheduler {
    shutdown: Arc<Notify>,
}

impl RolloverScheduler {
    /// Start the scheduler over the given store.
    #[must_use]
    pub fn start(store: CsvStore) -> Self {
        let shutdown = Arc::new(Notify::new());
        spawn_rollover_task(store, Arc::clone(&shutdown));
        Self { shutdown }
    }

    /// Stop the scheduler. No further firings occur after this returns.
    pub fn stop(&self) {
        self.shutdown.notify_one();
    }
}

fn spawn_rollover_task(store: CsvStore, shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        let data_dir = store.data_dir().to_path_buf();
        let tasks = TaskService::new(store.clone());
        let history = HistoryService::new(store);

        let mut delay = delay_until_midnight(chrono::Local::now().naive_local());
        log_rollover_event(&data_dir, "scheduler-started", None);

        loop {
            tokio::select! {
                () = tokio::time::sleep(delay) => {
                    // Errors are logged and swallowed; the schedule continues.
                    match run_rollover(&tasks, &history) {
                        Ok(()) => log_rollover_event(&data_dir, "completed", None),
                        Err(e) => {
                            eprintln!("Warning: daily rollover failed: {e}");
                            log_rollover_event(&data_dir, "failed", Some(&e.to_string()));
                        }
                    }
                    delay = Duration::from_secs(DAY_SECS);
                }
                () = shutdown.notified() => {
                    log_rollover_event(&data_dir, "scheduler-stopped", None);
                    break;
                }
            }
        }
    });
}
