//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod goal;
pub mod import;
pub mod report;
pub mod serve;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use import::{handle_import_command, ImportArgs};
pub use report::{handle_report_command, PeriodArgs, ReportCommands};
pub use serve::{handle_serve_command, ServeArgs};
