//! Sorting by date or amount
//!
//! Both directions are stable: records that compare equal keep their input order.

use std::fmt;
use std::str::FromStr;

use crate::models::Expense;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            other => Err(format!("Unknown sort key '{}'. Use 'date' or 'amount'", other)),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Unknown sort order '{}'. Use 'asc' or 'desc'", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Sort in place by the given key and direction
pub fn sort_expenses(expenses: &mut [Expense], key: SortKey, order: SortOrder) {
    match (key, order) {
        (SortKey::Date, SortOrder::Ascending) => expenses.sort_by(|a, b| a.date.cmp(&b.date)),
        (SortKey::Date, SortOrder::Descending) => expenses.sort_by(|a, b| b.date.cmp(&a.date)),
        (SortKey::Amount, SortOrder::Ascending) => {
            expenses.sort_by(|a, b| a.amount.cmp(&b.amount))
        }
        (SortKey::Amount, SortOrder::Descending) => {
            expenses.sort_by(|a, b| b.amount.cmp(&a.amount))
        }
    }
}

/// Return a sorted copy
pub fn sorted(expenses: &[Expense], key: SortKey, order: SortOrder) -> Vec<Expense> {
    let mut out = expenses.to_vec();
    sort_expenses(&mut out, key, order);
    out
}
