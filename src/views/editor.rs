//! Inline row editor
//!
//! Two states: viewing, or editing one row with a draft. Saving hands the
//! validated payload back to the caller, who sends it to the store.

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId, NewExpense};

use super::draft::ExpenseDraft;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowEditor {
    #[default]
    Viewing,
    Editing {
        id: ExpenseId,
        draft: ExpenseDraft,
    },
}

impl RowEditor {
    /// Start editing a row, capturing its current fields.
    /// Any edit already in progress is discarded.
    pub fn begin_edit(&mut self, expense: &Expense) {
        *self = Self::Editing {
            id: expense.id,
            draft: ExpenseDraft::from_expense(expense),
        };
    }

    /// Validate the draft and return the update for the store.
    ///
    /// On a validation error the editor stays in `Editing` with the draft intact.
    pub fn save(&mut self) -> ExpenseResult<(ExpenseId, NewExpense)> {
        let Self::Editing { id, draft } = self else {
            return Err(ExpenseError::Validation("No row is being edited".into()));
        };
        let new = draft.validate()?;
        let id = *id;
        *self = Self::Viewing;
        Ok((id, new))
    }

    /// Drop the draft without saving
    pub fn cancel(&mut self) {
        *self = Self::Viewing;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    pub fn editing_id(&self) -> Option<ExpenseId> {
        match self {
            Self::Editing { id, .. } => Some(*id),
            Self::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&ExpenseDraft> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::Viewing => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut ExpenseDraft> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::Viewing => None,
        }
    }
}
