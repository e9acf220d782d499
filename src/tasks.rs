//! Task operations over a [`RecordStore`].
//!
//! Each call loads the full table from disk, mutates it, and rewrites the
//! whole file. There is no in-memory cache; the file system is the source of
//! truth for every request.

use crate::error::{Error, Result};
use crate::models::Task;
use crate::store::RecordStore;

/// Service for listing and mutating tasks.
#[derive(Debug, Clone)]
pub struct TaskService<S> {
    store: S,
}

impl<S: RecordStore> TaskService<S> {
    /// Create a service over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// All tasks, ascending by display order.
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks file cannot be read or parsed.
    pub fn list(&self) -> Result<Vec<Task>> {
        self.store.load_tasks()
    }

    /// Look up a task by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks file cannot be read or parsed.
    pub fn get(&self, id: u32) -> Result<Option<Task>> {
        Ok(self.store.load_tasks()?.into_iter().find(|t| t.id == id))
    }

    /// Create a new task with the given name.
    ///
    /// The name is trimmed; id and order are each assigned as one past the
    /// current maximum (1 for an empty table).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTaskName`] if the trimmed name is empty, or an
    /// error if the tasks file cannot be read or written.
    pub fn create(&self, name: &str) -> Result<Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyTaskName);
        }

        let mut tasks = self.store.load_tasks()?;
        let id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        let order = tasks.iter().map(|t| t.order).max().map_or(1, |max| max + 1);

        let task = Task {
            id,
            name: name.to_string(),
            created_at: chrono::Local::now().naive_local(),
            completed: false,
            order,
        };

        tasks.push(task.clone());
        self.store.save_tasks(&tasks)?;
        Ok(task)
    }

    /// Rename a task. Returns `None` if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTaskName`] if the trimmed name is empty, or an
    /// error if the tasks file cannot be read or written.
    pub fn rename(&self, id: u32, name: &str) -> Result<Option<Task>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyTaskName);
        }

        let mut tasks = self.store.load_tasks()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        task.name = name.to_string();
        let updated = task.clone();
        self.store.save_tasks(&tasks)?;
        Ok(Some(updated))
    }

    /// Flip a task's completion flag. Returns `None` if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks file cannot be read or written.
    pub fn toggle(&self, id: u32) -> Result<Option<Task>> {
        let mut tasks = self.store.load_tasks()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        task.completed = !task.completed;
        let updated = task.clone();
        self.store.save_tasks(&tasks)?;
        Ok(Some(updated))
    }

    /// Delete a task. Returns `false` if the id is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks file cannot be read or written.
    pub fn delete(&self, id: u32) -> Result<bool> {
        let mut tasks = self.store.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Ok(false);
        }

        self.store.save_tasks(&tasks)?;
        Ok(true)
    }

    /// Clear the completion flag on every task.
    ///
    /// Used by the daily rollover after the day's counts are archived.
    ///
    /// # Errors
    ///
    /// Returns an error if the tasks file cannot be read or written.
    pub fn reset_all(&self) -> Result<()> {
        let mut tasks = self.store.load_tasks()?;
        for task in &mut tasks {
            task.completed = false;
        }
        self.store.save_tasks(&tasks)
    }
}
