//! History queries and aggregate statistics over a [`RecordStore`].

use crate::error::Result;
use crate::models::DailyHistory;
use crate::store::RecordStore;
use serde::Serialize;

/// How many days of history feed the aggregate statistics.
const STATISTICS_WINDOW_DAYS: i64 = 30;

/// Aggregate statistics over recent history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of days with a history record in the window.
    pub total_days: usize,
    /// Mean of the daily completion percentages, rounded to two decimals.
    pub average_completion_rate: f64,
    /// The day with the highest completion percentage, if any.
    pub best_day: Option<DailyHistory>,
    /// Sum of completed task counts across the window.
    pub total_tasks_completed: u64,
}

/// Service for reading history and archiving the current day.
#[derive(Debug, Clone)]
pub struct HistoryService<S> {
    store: S,
}

impl<S: RecordStore> HistoryService<S> {
    /// Create a service over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// History entries, newest first.
    ///
    /// `Some(0)` yields an empty list, a positive count limits to the most
    /// recent N days, and `None` or a negative count returns everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be read or parsed.
    pub fn history(&self, days: Option<i64>) -> Result<Vec<DailyHistory>> {
        let history = self.store.load_history()?;
        match days {
            Some(0) => Ok(Vec::new()),
            Some(n) if n > 0 => {
                let n = usize::try_from(n).unwrap_or(usize::MAX);
                Ok(history.into_iter().take(n).collect())
            }
            _ => Ok(history),
        }
    }

    /// The record for today's local date, if one has been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be read or parsed.
    pub fn today(&self) -> Result<Option<DailyHistory>> {
        let today = chrono::Local::now().date_naive();
        Ok(self.store.load_history()?.into_iter().find(|h| h.date == today))
    }

    /// Count today's tasks and upsert a history row for the current date.
    ///
    /// Returns the entry that was written.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or written.
    pub fn archive_today(&self) -> Result<DailyHistory> {
        let tasks = self.store.load_tasks()?;
        let entry = DailyHistory {
            date: chrono::Local::now().date_naive(),
            total_tasks: u32::try_from(tasks.len()).unwrap_or(u32::MAX),
            completed_tasks: u32::try_from(tasks.iter().filter(|t| t.completed).count())
                .unwrap_or(u32::MAX),
        };
        self.store.save_history(&entry)?;
        Ok(entry)
    }

    /// Aggregate statistics over the last 30 days of history.
    ///
    /// # Errors
    ///
    /// Returns an error if the history file cannot be read or parsed.
    pub fn statistics(&self) -> Result<Statistics> {
        let history = self.history(Some(STATISTICS_WINDOW_DAYS))?;
        if history.is_empty() {
            return Ok(Statistics {
                total_days: 0,
                average_completion_rate: 0.0,
                best_day: None,
                total_tasks_completed: 0,
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let average = history.iter().map(DailyHistory::completion_percentage).sum::<f64>()
            / history.len() as f64;
        // History is newest-first and max_by keeps the last maximal element,
        // so reverse-iterate to make ties resolve to the newest day.
        let best_day = history
            .iter()
            .rev()
            .max_by(|a, b| {
                a.completion_percentage().total_cmp(&b.completion_percentage())
            })
            .cloned();
        let total_completed =
            history.iter().map(|h| u64::from(h.completed_tasks)).sum();

        Ok(Statistics {
            total_days: history.len(),
            average_completion_rate: (average * 100.0).round() / 100.0,
            best_day,
            total_tasks_completed: total_completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CsvStore;
    use crate::tasks::TaskService;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_services() -> (TempDir, TaskService<CsvStore>, HistoryService<CsvStore>) {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("data")).unwrap();
        (dir, TaskService::new(store.clone()), HistoryService::new(store))
    }

    fn entry(store: &CsvStore, date: (i32, u32, u32), total: u32, completed: u32) {
        use crate::store::RecordStore;
        store
            .save_history(&DailyHistory {
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                total_tasks: total,
                completed_tasks: completed,
            })
            .unwrap();
    }

    fn seeded_service(dir: &TempDir) -> HistoryService<CsvStore> {
        let store = CsvStore::new(dir.path().join("data")).unwrap();
        entry(&store, (2025, 8, 1), 4, 1); // 25.0%
        entry(&store, (2025, 8, 2), 4, 3); // 75.0%
        entry(&store, (2025, 8, 3), 5, 2); // 40.0%
        HistoryService::new(store)
    }

    #[test]
    fn test_history_day_filters() {
        let dir = TempDir::new().unwrap();
        let service = seeded_service(&dir);

        assert_eq!(service.history(None).unwrap().len(), 3);
        assert_eq!(service.history(Some(-1)).unwrap().len(), 3);
        assert_eq!(service.history(Some(0)).unwrap().len(), 0);

        let recent = service.history(Some(2)).unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first, so the limit keeps the most recent days.
        assert_eq!(recent[0].date, NaiveDate::from_ymd_opt(2025, 8, 3).unwrap());
    }

    #[test]
    fn test_today_absent() {
        let (_dir, _tasks, history) = create_test_services();
        assert!(history.today().unwrap().is_none());
    }

    #[test]
    fn test_archive_today_then_lookup() {
        let (_dir, tasks, history) = create_test_services();
        tasks.create("A").unwrap();
        tasks.create("B").unwrap();
        tasks.toggle(1).unwrap();

        let written = history.archive_today().unwrap();
        assert_eq!(written.total_tasks, 2);
        assert_eq!(written.completed_tasks, 1);

        let today = history.today().unwrap().unwrap();
        assert_eq!(today, written);
    }

    #[test]
    fn test_archive_today_overwrites_earlier_snapshot() {
        let (_dir, tasks, history) = create_test_services();
        tasks.create("A").unwrap();
        history.archive_today().unwrap();

        tasks.toggle(1).unwrap();
        history.archive_today().unwrap();

        let all = history.history(None).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].completed_tasks, 1);
    }

    #[test]
    fn test_statistics_empty_history() {
        let (_dir, _tasks, history) = create_test_services();
        let stats = history.statistics().unwrap();
        assert_eq!(stats.total_days, 0);
        assert!((stats.average_completion_rate - 0.0).abs() < f64::EPSILON);
        assert!(stats.best_day.is_none());
        assert_eq!(stats.total_tasks_completed, 0);
    }

    #[test]
    fn test_statistics_best_day_tie_prefers_newest() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("data")).unwrap();
        entry(&store, (2025, 8, 1), 2, 1); // 50.0%
        entry(&store, (2025, 8, 2), 4, 2); // 50.0%
        entry(&store, (2025, 8, 3), 5, 1); // 20.0%
        let service = HistoryService::new(store);

        let stats = service.statistics().unwrap();
        assert_eq!(
            stats.best_day.unwrap().date,
            NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()
        );
    }

    #[test]
    fn test_statistics_aggregates_window() {
        let dir = TempDir::new().unwrap();
        let service = seeded_service(&dir);

        let stats = service.statistics().unwrap();
        assert_eq!(stats.total_days, 3);
        // (25.0 + 75.0 + 40.0) / 3 = 46.666... -> 46.67
        assert!((stats.average_completion_rate - 46.67).abs() < f64::EPSILON);
        assert_eq!(
            stats.best_day.unwrap().date,
            NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()
        );
        assert_eq!(stats.total_tasks_completed, 6);
    }
}
