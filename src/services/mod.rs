//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and logging of store failures.

pub mod expense;
pub mod import;

pub use expense::ExpenseService;
pub use import::{ImportResult, ImportService};
