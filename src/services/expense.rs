//! Expense service
//!
//! The data-access contract every surface goes through: list, create, update
//! and delete over the expense repository. Storage failures are logged at
//! error level and handed back to the caller unchanged.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, NewExpense};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    user_id: String,
}

/// Log a failed store operation before propagating it
fn logged<T>(operation: &str, result: ExpenseResult<T>) -> ExpenseResult<T> {
    if let Err(e) = &result {
        match e {
            ExpenseError::Validation(_) | ExpenseError::NotFound { .. } => {
                log::debug!("{} rejected: {}", operation, e)
            }
            _ => log::error!("Error {}: {}", operation, e),
        }
    }
    result
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service recording new expenses for the `"default"` user
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            user_id: "default".to_string(),
        }
    }

    /// Use a different owner for expenses created without a `user_id`
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// All expenses, newest date first
    pub fn list(&self) -> ExpenseResult<Vec<Expense>> {
        logged("fetching expenses", self.storage.expenses.get_all())
    }

    /// Persist a new expense and return the stored record
    pub fn create(&self, new: NewExpense) -> ExpenseResult<Expense> {
        logged("adding expense", self.create_inner(new))
    }

    fn create_inner(&self, new: NewExpense) -> ExpenseResult<Expense> {
        let new = new.validate()?;
        let expense = Expense::from_new(new, &self.user_id);

        self.storage.expenses.insert(expense.clone())?;

        log::info!("Created expense {} ({})", expense.id, expense.title);
        Ok(expense)
    }

    /// Persist several new expenses with one write, in the given order
    ///
    /// Every record is validated first; nothing is stored if any is invalid.
    pub fn create_many(&self, new: Vec<NewExpense>) -> ExpenseResult<Vec<Expense>> {
        logged("adding expenses", self.create_many_inner(new))
    }

    fn create_many_inner(&self, new: Vec<NewExpense>) -> ExpenseResult<Vec<Expense>> {
        let expenses = new
            .into_iter()
            .map(|n| n.validate().map(|n| Expense::from_new(n, &self.user_id)))
            .collect::<ExpenseResult<Vec<_>>>()?;

        self.storage.expenses.insert_many(expenses.clone())?;

        log::info!("Created {} expenses", expenses.len());
        Ok(expenses)
    }

    /// Replace all mutable fields of an existing expense
    pub fn update(&self, id: ExpenseId, new: NewExpense) -> ExpenseResult<Expense> {
        logged("updating expense", self.update_inner(id, new))
    }

    fn update_inner(&self, id: ExpenseId, new: NewExpense) -> ExpenseResult<Expense> {
        let new = new.validate()?;
        let previous = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let mut expense = previous;
        expense.apply(new);

        if !self.storage.expenses.replace(expense.clone())? {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }

        log::info!("Updated expense {}", expense.id);
        Ok(expense)
    }

    /// Delete an expense, returning the removed record
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        logged("deleting expense", self.delete_inner(id))
    }

    fn delete_inner(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .delete(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        log::info!("Deleted expense {}", id);
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full UUID or by its short display id (`exp-1a2b3c4d`)
    ///
    /// An ambiguous short id is a validation error.
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        let mut matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 | 1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "'{}' matches {} expenses; use a longer id",
                identifier, n
            ))),
        }
    }

    /// Like [`find`](Self::find), but a missing expense is an error
    pub fn find_required(&self, identifier: &str) -> ExpenseResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses.count()
    }
}
