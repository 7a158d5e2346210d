//! Main screen snapshot

use chrono::NaiveDate;

use crate::models::{Category, Expense, Money};
use crate::reports::{
    self, current_month_total, distinct_years, ranked_categories, totals_by_month, GoalProgress,
    GroupTotal, MonthKey, PeriodFilter,
};

/// Everything the dashboard shows, computed from one listing
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub period: PeriodFilter,
    /// Number of expenses in the selected period
    pub count: usize,
    /// Total of the selected period
    pub filtered_total: Money,
    /// Total of the calendar month containing `today`, regardless of the period
    pub current_month_total: Money,
    pub goal: GoalProgress,
    /// Category totals for the period, largest first
    pub categories: Vec<GroupTotal<Category>>,
    /// Monthly totals for the period, oldest first
    pub months: Vec<GroupTotal<MonthKey>>,
    /// Years available for the period selector
    pub years: Vec<i32>,
}

impl Dashboard {
    pub fn build(
        expenses: &[Expense],
        period: PeriodFilter,
        goal: Option<Money>,
        today: NaiveDate,
    ) -> Self {
        let filtered = period.apply(expenses);
        let current = current_month_total(expenses, today);

        Self {
            period,
            count: filtered.len(),
            filtered_total: reports::total(&filtered),
            current_month_total: current,
            goal: GoalProgress::compute(current, goal),
            categories: ranked_categories(&filtered),
            months: totals_by_month(&filtered),
            years: distinct_years(expenses),
        }
    }

    /// Largest category total, for scaling bars
    pub fn max_category_total(&self) -> Money {
        self.categories
            .iter()
            .map(|c| c.total)
            .max()
            .unwrap_or_default()
    }

    /// Largest monthly total, for scaling bars
    pub fn max_month_total(&self) -> Money {
        self.months.iter().map(|m| m.total).max().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::fixture;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()
    }

    #[test]
    fn test_build_for_all_time() {
        let dashboard = Dashboard::build(
            &fixture(),
            PeriodFilter::all(),
            Some(Money::from_major(2000)),
            today(),
        );
        assert_eq!(dashboard.count, 6);
        assert_eq!(dashboard.filtered_total, Money::from_major(154_200));
        assert_eq!(dashboard.current_month_total, Money::from_major(2550));
        assert!(dashboard.goal.is_over_budget());
        assert_eq!(dashboard.categories[0].key, Category::Housing);
        assert_eq!(dashboard.max_category_total(), Money::from_major(150_000));
        assert_eq!(dashboard.months.len(), 4);
        assert_eq!(dashboard.years, vec![2023, 2024]);
    }

    #[test]
    fn test_period_narrows_totals_but_not_goal() {
        let period = PeriodFilter::new(None, Some(2023)).unwrap();
        let dashboard = Dashboard::build(&fixture(), period, None, today());
        assert_eq!(dashboard.count, 2);
        assert_eq!(dashboard.filtered_total, Money::from_major(150_450));
        assert_eq!(dashboard.current_month_total, Money::from_major(2550));
        assert_eq!(dashboard.goal, GoalProgress::NoGoal);
        assert_eq!(dashboard.years, vec![2023, 2024]);
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::build(&[], PeriodFilter::all(), None, today());
        assert_eq!(dashboard.count, 0);
        assert_eq!(dashboard.max_category_total(), Money::zero());
        assert_eq!(dashboard.max_month_total(), Money::zero());
        assert!(dashboard.years.is_empty());
    }
}
