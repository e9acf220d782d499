//! # `daily_todos`
//!
//! CSV-backed personal task tracker with a midnight rollover job.
//!
//! Tasks and daily completion history live in two flat CSV files; every
//! operation loads the full table and rewrites it. A background scheduler
//! archives the day's counts and clears completion flags at local midnight.

pub mod config;
pub mod csv;
pub mod error;
pub mod history;
pub mod models;
pub mod rollover;
pub mod rollover_logging;
pub mod store;
pub mod tasks;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use history::{HistoryService, Statistics};
pub use models::{DailyHistory, Task};
pub use rollover::RolloverScheduler;
pub use store::{CsvStore, RecordStore};
pub use tasks::TaskService;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
