//! Error types for `daily_todos`.

/// Errors that can occur in the task tracker.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A persisted row contained a field that could not be parsed.
    ///
    /// This aborts the whole load; there is no row-level skip-and-continue
    /// for malformed fields.
    #[error("malformed record in {file} at line {line}: {message}")]
    MalformedRecord {
        /// The file the record came from (e.g. `tasks.csv`).
        file: &'static str,
        /// The 1-based line number within the file.
        line: usize,
        /// What failed to parse.
        message: String,
    },

    /// A task name was empty or whitespace-only.
    #[error("task name must not be empty")]
    EmptyTaskName,
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
