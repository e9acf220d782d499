//! Record types for tasks and daily history.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned as `max(existing) + 1` on creation.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// When the task was created (local time, no timezone stored).
    pub created_at: NaiveDateTime,
    /// Whether the task is done. Reset to false by the daily rollover.
    pub completed: bool,
    /// Display position; tasks are listed ascending by this value.
    pub order: u32,
}

/// A per-day snapshot of total vs. completed task counts.
///
/// At most one record exists per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHistory {
    /// The day these counts are for.
    pub date: NaiveDate,
    /// Total number of tasks on that day.
    pub total_tasks: u32,
    /// How many of them were completed.
    pub completed_tasks: u32,
}

impl DailyHistory {
    /// Percentage of tasks completed, rounded to one decimal place.
    ///
    /// Exactly `0.0` when there were no tasks at all.
    #[must_use]
    pub fn completion_percentage(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.completed_tasks) / f64::from(self.total_tasks) * 100.0;
        (ratio * 10.0).round() / 10.0
    }
}
