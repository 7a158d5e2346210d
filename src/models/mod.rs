//! Core data models for the expense tracker

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, UnknownCategory};
pub use expense::{parse_date, Expense, NewExpense};
pub use ids::ExpenseId;
pub use money::{CurrencyFormat, Money, MoneyParseError};
