//! Storage layer for the expense tracker
//!
//! JSON file storage with atomic writes and automatic directory creation.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseResult;

/// Storage coordinator that owns the repositories
pub struct Storage {
    paths: ExpensePaths,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> ExpenseResult<()> {
        self.expenses.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> ExpenseResult<()> {
        self.expenses.save()
    }

    /// Check if storage has been initialized (settings file written)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
