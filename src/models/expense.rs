//! Expense model
//!
//! A single recorded spending event, and the `NewExpense` payload used to
//! create or replace one.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;
use crate::error::{ExpenseError, ExpenseResult};

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned by the store
    pub id: ExpenseId,

    /// Owning user
    #[serde(default = "default_user_id")]
    pub user_id: String,

    pub title: String,

    /// Amount spent; negative values (refunds) are allowed
    pub amount: Money,

    pub date: NaiveDate,

    pub category: Category,

    /// When the store created the record
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_user_id() -> String {
    "default".to_string()
}

/// Date formats accepted from users and CSV files
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y"];

/// Parse a calendar date in any of the accepted formats
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

impl Expense {
    /// Build a stored expense from a validated payload
    pub fn from_new(new: NewExpense, default_user_id: &str) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id: new.user_id.unwrap_or_else(|| default_user_id.to_string()),
            title: new.title,
            amount: new.amount,
            date: new.date,
            category: new.category,
            created_at: Some(Utc::now()),
        }
    }

    /// Replace all mutable fields; `id` and `created_at` are kept
    pub fn apply(&mut self, new: NewExpense) {
        if let Some(user_id) = new.user_id {
            self.user_id = user_id;
        }
        self.title = new.title;
        self.amount = new.amount;
        self.date = new.date;
        self.category = new.category;
    }

    /// 1-based calendar month of the expense date
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The editable fields of this expense as a payload
    pub fn to_new(&self) -> NewExpense {
        NewExpense {
            user_id: Some(self.user_id.clone()),
            title: self.title.clone(),
            amount: self.amount,
            date: self.date,
            category: self.category.clone(),
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.title, self.amount, self.category
        )
    }
}

/// Payload for creating or replacing an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Owner; the configured user when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub category: Category,
}

impl NewExpense {
    pub fn new(
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: Category,
    ) -> Self {
        Self {
            user_id: None,
            title: title.into(),
            amount,
            date,
            category,
        }
    }

    /// Trim text fields and reject empty ones
    pub fn validate(mut self) -> ExpenseResult<Self> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(ExpenseError::Validation("Title is required".into()));
        }
        if self.category.name().trim().is_empty() {
            return Err(ExpenseError::Validation("Category is required".into()));
        }
        if !self.amount.is_within_limit() {
            return Err(ExpenseError::Validation(format!(
                "Amount must be at most {} in either direction",
                Money::MAX.major()
            )));
        }
        if let Some(user_id) = &self.user_id {
            if user_id.trim().is_empty() {
                self.user_id = None;
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coffee() -> NewExpense {
        NewExpense::new(
            "Coffee",
            Money::from_major(500),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Category::Food,
        )
    }

    #[test]
    fn test_from_new_assigns_id_and_user() {
        let expense = Expense::from_new(coffee(), "default");
        assert_eq!(expense.user_id, "default");
        assert_eq!(expense.title, "Coffee");
        assert!(expense.created_at.is_some());
        assert_eq!(expense.month(), 3);
        assert_eq!(expense.year(), 2024);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut expense = Expense::from_new(coffee(), "default");
        let id = expense.id;
        let created = expense.created_at;

        let mut update = coffee();
        update.title = "Espresso".into();
        update.amount = Money::from_major(650);
        expense.apply(update);

        assert_eq!(expense.id, id);
        assert_eq!(expense.created_at, created);
        assert_eq!(expense.title, "Espresso");
        assert_eq!(expense.amount, Money::from_major(650));
        assert_eq!(expense.user_id, "default");
    }

    #[test]
    fn test_validate_trims_and_rejects_empty_title() {
        let mut new = coffee();
        new.title = "  Coffee  ".into();
        assert_eq!(new.validate().unwrap().title, "Coffee");

        let mut new = coffee();
        new.title = "   ".into();
        assert!(new.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_amount_beyond_limit() {
        let mut new = coffee();
        new.amount = Money::MAX;
        assert!(new.validate().is_ok());

        let mut new = coffee();
        new.amount = Money::from_major(-1_000_000_000_001);
        assert!(new.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "user_id": "default",
            "title": "Coffee",
            "amount": 500,
            "date": "2024-03-01",
            "category": "Food",
            "created_at": "2024-03-01T08:00:00Z"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.amount, Money::from_major(500));
        assert_eq!(expense.category, Category::Food);

        let value = serde_json::to_value(&expense).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in ["id", "user_id", "title", "amount", "date", "category", "created_at"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(value["amount"], 500);
        assert_eq!(value["date"], "2024-03-01");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(parse_date("2024-03-01"), expected);
        assert_eq!(parse_date("2024/03/01"), expected);
        assert_eq!(parse_date(" 01.03.2024 "), expected);
        assert_eq!(parse_date("03/01/2024"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_new_expense_user_id_optional() {
        let json = r#"{"title":"Bus","amount":12.5,"date":"2024-01-02","category":"transportation"}"#;
        let new: NewExpense = serde_json::from_str(json).unwrap();
        assert_eq!(new.user_id, None);
        assert_eq!(new.amount.cents(), 1250);
        assert_eq!(new.category, Category::Transportation);
    }
}
