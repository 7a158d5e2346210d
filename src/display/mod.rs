//! Display formatting for terminal output
//!
//! Tables for expense lists and text renderings of reports.

pub mod expense;
pub mod report;

pub use expense::{format_expense_details, format_expense_table};
pub use report::{format_daily_overview, format_dashboard, format_goal, format_group_rows};
