//! Presentation state shared by the CLI and TUI
//!
//! Views load a listing from the store, run it through the aggregation
//! engine with the user's selections, and hold the result.

pub mod dashboard;
pub mod draft;
pub mod editor;
pub mod list;
pub mod overview;

pub use dashboard::Dashboard;
pub use draft::{DraftField, ExpenseDraft};
pub use editor::RowEditor;
pub use list::ExpenseListState;
pub use overview::{DailyOverview, DayRow};
