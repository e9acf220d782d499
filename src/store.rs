//! CSV-backed record store for tasks and daily history.
//!
//! Both tables are persisted as whole-file snapshots with a header line:
//! every write re-serializes the entire collection and overwrites the file in
//! place. There is no temp-file-and-rename, so a crash mid-write can truncate
//! the file — an accepted limitation of the format.

use crate::csv;
use crate::error::{Error, Result};
use crate::models::{DailyHistory, Task};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Tasks file name within the data directory.
pub const TASKS_FILENAME: &str = "tasks.csv";

/// History file name within the data directory.
pub const HISTORY_FILENAME: &str = "history.csv";

const TASKS_HEADER: &str = "Id,Name,CreatedDate,IsCompleted,Order";
const HISTORY_HEADER: &str = "Date,TotalTasks,CompletedTasks";

/// Timestamp format for the `CreatedDate` column.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format for the `Date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for durable storage of the task and history tables.
///
/// The file system is the source of truth: callers load the full table for
/// every read and rewrite it for every write. There is no locking between
/// concurrent callers (last-writer-wins).
#[allow(clippy::missing_errors_doc)]
pub trait RecordStore {
    /// Load all tasks, sorted ascending by display order.
    ///
    /// An absent file is an empty table, not an error.
    fn load_tasks(&self) -> Result<Vec<Task>>;

    /// Serialize all tasks and overwrite the tasks file.
    fn save_tasks(&self, tasks: &[Task]) -> Result<()>;

    /// Load all history entries, sorted descending by date.
    fn load_history(&self) -> Result<Vec<DailyHistory>>;

    /// Insert or replace the history row for `entry.date`.
    fn save_history(&self, entry: &DailyHistory) -> Result<()>;
}

/// File-based implementation of [`RecordStore`].
#[derive(Debug, Clone)]
pub struct CsvStore {
    data_dir: PathBuf,
    tasks_path: PathBuf,
    history_path: PathBuf,
}

impl CsvStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            tasks_path: data_dir.join(TASKS_FILENAME),
            history_path: data_dir.join(HISTORY_FILENAME),
            data_dir,
        })
    }

    /// The directory holding both data files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the tasks file.
    #[must_use]
    pub fn tasks_path(&self) -> &Path {
        &self.tasks_path
    }

    /// Path to the history file.
    #[must_use]
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }
}

/// Read a file to string, mapping a missing file to `None`.
fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_u32(value: &str, file: &'static str, line: usize, column: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| Error::MalformedRecord {
        file,
        line,
        message: format!("invalid {column}: '{value}'"),
    })
}

fn parse_bool(value: &str, file: &'static str, line: usize, column: &str) -> Result<bool> {
    // Accepts "True"/"False" as well, for files written by earlier tooling.
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::MalformedRecord {
            file,
            line,
            message: format!("invalid {column}: '{value}'"),
        }),
    }
}

fn parse_datetime(value: &str, file: &'static str, line: usize, column: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT).map_err(|_| {
        Error::MalformedRecord { file, line, message: format!("invalid {column}: '{value}'") }
    })
}

fn parse_date(value: &str, file: &'static str, line: usize, column: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| Error::MalformedRecord {
        file,
        line,
        message: format!("invalid {column}: '{value}'"),
    })
}

impl RecordStore for CsvStore {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        let Some(content) = read_if_exists(&self.tasks_path)? else {
            return Ok(Vec::new());
        };

        let mut tasks = Vec::new();
        // Skip the header line; line numbers are 1-based including it.
        for (index, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let fields = csv::split_line(line);
            if fields.len() < 5 {
                // Short rows are skipped, not errors.
                continue;
            }
            let lineno = index + 1;
            tasks.push(Task {
                id: parse_u32(&fields[0], TASKS_FILENAME, lineno, "id")?,
                name: fields[1].clone(),
                created_at: parse_datetime(&fields[2], TASKS_FILENAME, lineno, "created date")?,
                completed: parse_bool(&fields[3], TASKS_FILENAME, lineno, "completed flag")?,
                order: parse_u32(&fields[4], TASKS_FILENAME, lineno, "order")?,
            });
        }

        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        let mut lines = vec![TASKS_HEADER.to_string()];
        for task in tasks {
            lines.push(format!(
                "{},\"{}\",{},{},{}",
                task.id,
                csv::escape_field(&task.name),
                task.created_at.format(DATETIME_FORMAT),
                task.completed,
                task.order
            ));
        }
        fs::write(&self.tasks_path, lines.join("\n") + "\n")?;
        Ok(())
    }

    fn load_history(&self) -> Result<Vec<DailyHistory>> {
        let Some(content) = read_if_exists(&self.history_path)? else {
            return Ok(Vec::new());
        };

        let mut history = Vec::new();
        for (index, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let fields = csv::split_line(line);
            if fields.len() < 3 {
                continue;
            }
            let lineno = index + 1;
            history.push(DailyHistory {
                date: parse_date(&fields[0], HISTORY_FILENAME, lineno, "date")?,
                total_tasks: parse_u32(&fields[1], HISTORY_FILENAME, lineno, "total tasks")?,
                completed_tasks: parse_u32(&fields[2], HISTORY_FILENAME, lineno, "completed tasks")?,
            });
        }

        history.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(history)
    }

    fn save_history(&self, entry: &DailyHistory) -> Result<()> {
        let mut lines: Vec<String> = match read_if_exists(&self.history_path)? {
            Some(content) => content.lines().map(str::to_string).collect(),
            None => vec![HISTORY_HEADER.to_string()],
        };

        let date_string = entry.date.format(DATE_FORMAT).to_string();
        let new_line =
            format!("{},{},{}", date_string, entry.total_tasks, entry.completed_tasks);

        // Replace the existing row for this date if there is one, else append.
        if let Some(existing) =
            lines.iter_mut().skip(1).find(|line| line.starts_with(&date_string))
        {
            *existing = new_line;
        } else {
            lines.push(new_line);
        }

        fs::write(&self.history_path, lines.join("\n") + "\n")?;
        Ok(())
    }
}
