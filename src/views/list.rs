//! Expense list state
//!
//! The view's local copy of the collection plus the user's current filter,
//! sort and selection. After a successful store call the same mutation is
//! applied here instead of reloading; the last mutation applied wins.

use crate::models::{Expense, ExpenseId, Money};
use crate::reports::{AmountRange, ExpenseQuery, PeriodFilter, SortKey, SortOrder};

#[derive(Debug, Clone)]
pub struct ExpenseListState {
    expenses: Vec<Expense>,
    query: ExpenseQuery,
    selected: Option<ExpenseId>,
}

impl Default for ExpenseListState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ExpenseListState {
    /// Start from a store listing, sorted newest first
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self {
            expenses,
            query: ExpenseQuery {
                sort: Some((SortKey::Date, SortOrder::Descending)),
                ..ExpenseQuery::default()
            },
            selected: None,
        }
    }

    /// Replace the local copy with a fresh listing, keeping the selection if it still exists
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
        if let Some(id) = self.selected {
            if !self.expenses.iter().any(|e| e.id == id) {
                self.selected = None;
            }
        }
    }

    /// The whole local copy, unfiltered
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn query(&self) -> &ExpenseQuery {
        &self.query
    }

    /// Rows to show: period filter, then amount range, then sort
    pub fn visible(&self) -> Vec<Expense> {
        self.query.apply(&self.expenses)
    }

    /// Sum of the visible rows
    pub fn visible_total(&self) -> Money {
        self.visible().iter().map(|e| e.amount).sum()
    }

    pub fn set_period(&mut self, period: PeriodFilter) {
        self.query.period = period;
    }

    pub fn set_amount_range(&mut self, range: AmountRange) {
        self.query.amount = range;
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.query.sort = Some((key, order));
    }

    /// Sort by `key`; choosing the current key again flips the direction
    pub fn toggle_sort(&mut self, key: SortKey) {
        let order = match self.query.sort {
            Some((current, order)) if current == key => order.toggled(),
            _ => SortOrder::Descending,
        };
        self.query.sort = Some((key, order));
    }

    pub fn select(&mut self, id: Option<ExpenseId>) {
        self.selected = id;
    }

    pub fn selected_id(&self) -> Option<ExpenseId> {
        self.selected
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        let id = self.selected?;
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Position of the selection within the visible rows
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected?;
        self.visible().iter().position(|e| e.id == id)
    }

    /// Move the selection through the visible rows, clamping at both ends
    pub fn move_selection(&mut self, delta: isize) {
        let visible = self.visible();
        if visible.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected_index() {
            Some(i) => (i as isize + delta).clamp(0, visible.len() as isize - 1) as usize,
            None => 0,
        };
        self.selected = Some(visible[next].id);
    }

    /// A newly created record goes to the front
    pub fn apply_created(&mut self, expense: Expense) {
        self.expenses.insert(0, expense);
    }

    /// Replace the record with the same id; unknown ids are ignored
    pub fn apply_updated(&mut self, expense: Expense) {
        if let Some(slot) = self.expenses.iter_mut().find(|e| e.id == expense.id) {
            *slot = expense;
        }
    }

    /// Remove a record; clears the selection if it pointed at it
    pub fn apply_deleted(&mut self, id: ExpenseId) {
        self.expenses.retain(|e| e.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{expense, fixture, titles};

    #[test]
    fn test_visible_applies_filter_range_and_sort() {
        let mut state = ExpenseListState::new(fixture());
        assert_eq!(state.visible()[0].title, "Lunch");

        state.set_period(PeriodFilter::new(Some(3), Some(2024)).unwrap());
        state.set_amount_range(AmountRange::new(Some(Money::from_major(300)), None));
        state.set_sort(SortKey::Amount, SortOrder::Ascending);
        assert_eq!(titles(&state.visible()), vec!["Coffee", "Lunch"]);
        assert_eq!(state.visible_total(), Money::from_major(2300));
        assert_eq!(state.expenses().len(), 6);
    }

    #[test]
    fn test_inverted_range_shows_nothing() {
        let mut state = ExpenseListState::new(fixture());
        state.set_amount_range(AmountRange::new(
            Some(Money::from_major(10)),
            Some(Money::from_major(1)),
        ));
        assert!(state.visible().is_empty());
    }

    #[test]
    fn test_apply_created_prepends() {
        let mut state = ExpenseListState::new(fixture());
        state.apply_created(expense("New", "2020-01-01", 1, "Other"));
        assert_eq!(state.expenses()[0].title, "New");
        assert_eq!(state.expenses().len(), 7);
    }

    #[test]
    fn test_apply_updated_last_write_wins() {
        let mut state = ExpenseListState::new(fixture());
        let mut first = state.expenses()[0].clone();
        let mut second = first.clone();
        first.title = "First write".into();
        second.title = "Second write".into();

        state.apply_updated(first);
        state.apply_updated(second);
        assert_eq!(state.expenses()[0].title, "Second write");

        state.apply_updated(expense("Ghost", "2024-01-01", 1, "Other"));
        assert_eq!(state.expenses().len(), 6);
    }

    #[test]
    fn test_apply_deleted_clears_selection() {
        let mut state = ExpenseListState::new(fixture());
        let id = state.expenses()[2].id;
        state.select(Some(id));
        assert_eq!(state.selected_expense().unwrap().title, "Lunch");

        state.apply_deleted(id);
        assert_eq!(state.selected_id(), None);
        assert!(state.expenses().iter().all(|e| e.id != id));
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut state = ExpenseListState::new(fixture());
        state.move_selection(1);
        assert_eq!(state.selected_index(), Some(0));
        state.move_selection(-5);
        assert_eq!(state.selected_index(), Some(0));
        state.move_selection(100);
        assert_eq!(state.selected_index(), Some(5));
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = ExpenseListState::new(fixture());
        state.toggle_sort(SortKey::Date);
        assert_eq!(state.query().sort, Some((SortKey::Date, SortOrder::Ascending)));
        state.toggle_sort(SortKey::Amount);
        assert_eq!(state.query().sort, Some((SortKey::Amount, SortOrder::Descending)));
    }
}
