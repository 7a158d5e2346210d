//! Expense Tracker - personal expense tracking from the terminal
//!
//! This library provides the core functionality for the `expenses` binary:
//! recording expenses, filtering and aggregating them, tracking a monthly
//! spending goal, importing CSV files, and serving a small JSON API.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, money)
//! - `storage`: JSON file storage layer
//! - `services`: Data-access and import layer
//! - `reports`: Pure filtering, sorting and aggregation
//! - `views`: Presentation state shared by the CLI and TUI
//! - `display`: Plain-text rendering for the CLI
//! - `cli`, `tui`, `api`: The three front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::{ExpensePaths, Settings};
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let expenses = ExpenseService::new(&storage).list()?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;
pub mod views;

pub use error::{ExpenseError, ExpenseResult};
