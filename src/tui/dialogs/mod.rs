//! TUI dialogs
//!
//! Popups drawn over the active view: the add-expense form, the amount
//! filter, the goal editor, delete confirmation and help.

pub mod amount;
pub mod confirm;
pub mod expense;
pub mod goal;
pub mod help;
