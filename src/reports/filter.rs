//! Period and amount filters
//!
//! Filters never fail on data: an empty or inverted selection simply yields
//! an empty result. Only parsing user input can fail.

use std::fmt;

use chrono::{Datelike, Month};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};

/// Keep expenses from a given month and/or year
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodFilter {
    /// 1-based month; `None` matches every month
    pub month: Option<u32>,
    /// Calendar year; `None` matches every year
    pub year: Option<i32>,
}

impl PeriodFilter {
    /// A filter that keeps everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(month: Option<u32>, year: Option<i32>) -> ExpenseResult<Self> {
        if let Some(m) = month {
            if !(1..=12).contains(&m) {
                return Err(ExpenseError::Validation(format!(
                    "Month must be between 1 and 12, got {}",
                    m
                )));
            }
        }
        Ok(Self { month, year })
    }

    /// Parse user selections; `"all"` (or empty) leaves a part unset
    ///
    /// Months may be given as numbers (`3`) or names (`march`, `Mar`).
    pub fn parse(month: &str, year: &str) -> ExpenseResult<Self> {
        Self::new(parse_month(month)?, parse_year(year)?)
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| expense.date.month() == m)
            && self.year.map_or(true, |y| expense.date.year() == y)
    }

    pub fn is_all(&self) -> bool {
        self.month.is_none() && self.year.is_none()
    }

    /// Keep the matching expenses, preserving order
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

impl fmt::Display for PeriodFilter {
    /// "All time", "2024", "March (every year)" or "March 2024"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month_name = self
            .month
            .and_then(|m| Month::try_from(u8::try_from(m).ok()?).ok())
            .map(|m| m.name());
        match (month_name, self.year) {
            (None, None) => write!(f, "All time"),
            (None, Some(y)) => write!(f, "{}", y),
            (Some(m), None) => write!(f, "{} (every year)", m),
            (Some(m), Some(y)) => write!(f, "{} {}", m, y),
        }
    }
}

fn is_all(s: &str) -> bool {
    s.is_empty() || s.eq_ignore_ascii_case("all")
}

fn parse_month(s: &str) -> ExpenseResult<Option<u32>> {
    let s = s.trim();
    if is_all(s) {
        return Ok(None);
    }
    if let Ok(n) = s.parse::<u32>() {
        return Ok(Some(n));
    }
    s.parse::<Month>()
        .map(|m| Some(m.number_from_month()))
        .map_err(|_| ExpenseError::Validation(format!("Invalid month: '{}'", s)))
}

fn parse_year(s: &str) -> ExpenseResult<Option<i32>> {
    let s = s.trim();
    if is_all(s) {
        return Ok(None);
    }
    s.parse::<i32>()
        .map(Some)
        .map_err(|_| ExpenseError::Validation(format!("Invalid year: '{}'", s)))
}

/// Keep expenses whose amount lies within inclusive bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountRange {
    pub min: Option<Money>,
    pub max: Option<Money>,
}

impl AmountRange {
    pub fn new(min: Option<Money>, max: Option<Money>) -> Self {
        Self { min, max }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        self.min.map_or(true, |min| expense.amount >= min)
            && self.max.map_or(true, |max| expense.amount <= max)
    }

    /// True when min > max, which matches nothing
    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }

    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        expenses.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}
