//! Expense form model
//!
//! Raw text as typed by the user, shared by the "add" and "edit" forms.
//! Nothing reaches the store until [`ExpenseDraft::validate`] succeeds.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Category, Expense, Money, NewExpense};

/// Form fields in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Amount,
    Date,
    Category,
}

impl DraftField {
    pub const ALL: [DraftField; 4] = [
        DraftField::Title,
        DraftField::Amount,
        DraftField::Date,
        DraftField::Category,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Amount => "Amount",
            Self::Date => "Date",
            Self::Category => "Category",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Category,
            Self::Category => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Category,
            Self::Amount => Self::Title,
            Self::Date => Self::Amount,
            Self::Category => Self::Date,
        }
    }
}

/// Unvalidated form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: String,
    /// Category of the record being edited; kept even if it is not a standard one
    original_category: Option<Category>,
}

impl ExpenseDraft {
    /// Empty form with the date prefilled
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Form prefilled from an existing expense
    pub fn from_expense(expense: &Expense) -> Self {
        let amount = if expense.amount.cents_part() == 0 {
            expense.amount.major().to_string()
        } else {
            expense.amount.to_string()
        };
        Self {
            title: expense.title.clone(),
            amount,
            date: expense.date.format("%Y-%m-%d").to_string(),
            category: expense.category.name().to_string(),
            original_category: Some(expense.category.clone()),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Amount => &self.amount,
            DraftField::Date => &self.date,
            DraftField::Category => &self.category,
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Amount => &mut self.amount,
            DraftField::Date => &mut self.date,
            DraftField::Category => &mut self.category,
        }
    }

    /// Check every field and build the store payload
    pub fn validate(&self) -> ExpenseResult<NewExpense> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ExpenseError::Validation("Title is required".into()));
        }

        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(ExpenseError::Validation("Amount is required".into()));
        }
        let amount = Money::parse(amount).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let date = self.date.trim();
        if date.is_empty() {
            return Err(ExpenseError::Validation("Date is required".into()));
        }
        let date = parse_date(date).ok_or_else(|| {
            ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", date))
        })?;

        let category = self.parse_category()?;

        Ok(NewExpense::new(title, amount, date, category))
    }

    fn parse_category(&self) -> ExpenseResult<Category> {
        let input = self.category.trim();
        if input.is_empty() {
            return Err(ExpenseError::Validation("Category is required".into()));
        }
        if let Some(original) = &self.original_category {
            if original.name().eq_ignore_ascii_case(input) {
                return Ok(original.clone());
            }
        }
        input
            .parse::<Category>()
            .map_err(|e| ExpenseError::Validation(e.to_string()))
    }
}
