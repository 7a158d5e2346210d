//! Aggregation engine
//!
//! Pure functions over expense slices: period and amount filters, sorting,
//! grouped totals and goal progress. Nothing here touches storage.

pub mod filter;
pub mod goal;
pub mod grouping;
pub mod sort;

pub use filter::{AmountRange, PeriodFilter};
pub use goal::GoalProgress;
pub use grouping::{
    average_daily_spend, bar_ratio, current_month_total, distinct_years, group_totals,
    ranked_categories, top_categories, total, totals_by_category, totals_by_day,
    totals_by_month, GroupTotal, MonthKey,
};
pub use sort::{sort_expenses, sorted, SortKey, SortOrder};

use crate::models::Expense;

/// A full list selection: period, then amount range, then optional sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub period: PeriodFilter,
    pub amount: AmountRange,
    /// `None` keeps the input order
    pub sort: Option<(SortKey, SortOrder)>,
}

impl ExpenseQuery {
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut out: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.period.matches(e) && self.amount.matches(e))
            .cloned()
            .collect();
        if let Some((key, order)) = self.sort {
            sort_expenses(&mut out, key, order);
        }
        out
    }
}
