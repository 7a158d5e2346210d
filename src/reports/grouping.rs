//! Grouping and summary totals
//!
//! Every grouping conserves the total: the group totals always add up to
//! the sum of the input amounts.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};

use crate::models::{Category, Expense, Money};

/// Sum and count of the expenses sharing a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: Money,
    pub count: usize,
}

/// Calendar month used as a grouping key; orders chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    /// Formats as "March 2024"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => write!(f, "{}", first.format("%B %Y")),
            None => write!(f, "{}-{:02}", self.year, self.month),
        }
    }
}

/// Group expenses by a derived key, in first-occurrence order
pub fn group_totals<K, F>(expenses: &[Expense], key_fn: F) -> Vec<GroupTotal<K>>
where
    K: Eq + Hash + Clone,
    F: Fn(&Expense) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal<K>> = Vec::new();

    for expense in expenses {
        let key = key_fn(expense);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupTotal {
                key,
                total: Money::zero(),
                count: 0,
            });
            groups.len() - 1
        });
        groups[slot].total += expense.amount;
        groups[slot].count += 1;
    }

    groups
}

/// Totals per category, in first-occurrence order
pub fn totals_by_category(expenses: &[Expense]) -> Vec<GroupTotal<Category>> {
    group_totals(expenses, |e| e.category.clone())
}

/// Totals per category, largest first; equal totals keep first-occurrence order
pub fn ranked_categories(expenses: &[Expense]) -> Vec<GroupTotal<Category>> {
    let mut totals = totals_by_category(expenses);
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// The `n` categories with the largest totals
pub fn top_categories(expenses: &[Expense], n: usize) -> Vec<GroupTotal<Category>> {
    let mut ranked = ranked_categories(expenses);
    ranked.truncate(n);
    ranked
}

/// Totals per calendar day, newest day first
pub fn totals_by_day(expenses: &[Expense]) -> Vec<GroupTotal<NaiveDate>> {
    let mut days = group_totals(expenses, |e| e.date);
    days.sort_by(|a, b| b.key.cmp(&a.key));
    days
}

/// Totals per calendar month, oldest month first
pub fn totals_by_month(expenses: &[Expense]) -> Vec<GroupTotal<MonthKey>> {
    let mut months = group_totals(expenses, |e| MonthKey::of(e.date));
    months.sort_by(|a, b| a.key.cmp(&b.key));
    months
}

/// Sum of all amounts
pub fn total(expenses: &[Expense]) -> Money {
    expenses.iter().map(|e| e.amount).sum()
}

/// Sum of amounts dated in the same month and year as `today`
pub fn current_month_total(expenses: &[Expense], today: NaiveDate) -> Money {
    let current = MonthKey::of(today);
    expenses
        .iter()
        .filter(|e| MonthKey::of(e.date) == current)
        .map(|e| e.amount)
        .sum()
}

/// Calendar years present in the data, ascending
pub fn distinct_years(expenses: &[Expense]) -> Vec<i32> {
    expenses
        .iter()
        .map(|e| e.date.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Mean of the daily totals; zero when there are no days
pub fn average_daily_spend(daily: &[GroupTotal<NaiveDate>]) -> Money {
    if daily.is_empty() {
        return Money::zero();
    }
    let sum: Money = daily.iter().map(|d| d.total).sum();
    Money::from_cents((sum.cents() as f64 / daily.len() as f64).round() as i64)
}

/// `value` as a percentage of `max`, clamped to 0..=100; zero when `max <= 0`
pub fn bar_ratio(value: Money, max: Money) -> f64 {
    if !max.is_positive() {
        return 0.0;
    }
    (value.as_f64() / max.as_f64() * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{expense, fixture};

    #[test]
    fn test_category_grouping_sums() {
        let expenses = vec![
            expense("a", "2024-03-01", 100, "Food"),
            expense("b", "2024-03-02", 50, "Food"),
            expense("c", "2024-03-03", 30, "Transportation"),
        ];
        let totals = totals_by_category(&expenses);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].key, Category::Food);
        assert_eq!(totals[0].total, Money::from_major(150));
        assert_eq!(totals[0].count, 2);
        assert_eq!(totals[1].key, Category::Transportation);
        assert_eq!(totals[1].total, Money::from_major(30));
    }

    #[test]
    fn test_groupings_conserve_total() {
        let expenses = fixture();
        let sum = total(&expenses);

        let by_cat: Money = totals_by_category(&expenses).iter().map(|g| g.total).sum();
        let by_day: Money = totals_by_day(&expenses).iter().map(|g| g.total).sum();
        let by_month: Money = totals_by_month(&expenses).iter().map(|g| g.total).sum();
        assert_eq!(by_cat, sum);
        assert_eq!(by_day, sum);
        assert_eq!(by_month, sum);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let mut a = expense("a", "2024-03-01", 0, "Food");
        let mut b = expense("b", "2024-03-01", 0, "Food");
        a.amount = Money::from_cents(i64::MAX - 10);
        b.amount = Money::from_cents(i64::MAX - 10);
        let expenses = vec![a, b];

        assert_eq!(total(&expenses).cents(), i64::MAX);
        assert_eq!(totals_by_category(&expenses)[0].total.cents(), i64::MAX);
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(current_month_total(&expenses, today).cents(), i64::MAX);
    }

    #[test]
    fn test_ranked_and_top_categories() {
        let ranked = ranked_categories(&fixture());
        assert_eq!(ranked[0].key, Category::Housing);
        assert!(ranked.windows(2).all(|w| w[0].total >= w[1].total));

        let top = top_categories(&fixture(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[1].key, Category::Food);
    }

    #[test]
    fn test_days_newest_first() {
        let expenses = vec![
            expense("a", "2024-03-01", 100, "Food"),
            expense("b", "2024-03-05", 50, "Food"),
            expense("c", "2024-03-01", 30, "Food"),
        ];
        let days = totals_by_day(&expenses);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].key.to_string(), "2024-03-05");
        assert_eq!(days[1].total, Money::from_major(130));
        assert_eq!(days[1].count, 2);
    }

    #[test]
    fn test_months_chronological_with_labels() {
        let months = totals_by_month(&fixture());
        let labels: Vec<String> = months.iter().map(|m| m.key.to_string()).collect();
        assert_eq!(
            labels,
            vec!["March 2023", "November 2023", "January 2024", "March 2024"]
        );
    }

    #[test]
    fn test_current_month_total() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        assert_eq!(current_month_total(&fixture(), today), Money::from_major(2550));

        let empty_month = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        assert_eq!(current_month_total(&fixture(), empty_month), Money::zero());
    }

    #[test]
    fn test_distinct_years_sorted() {
        assert_eq!(distinct_years(&fixture()), vec![2023, 2024]);
        assert!(distinct_years(&[]).is_empty());
    }

    #[test]
    fn test_average_daily_spend() {
        assert_eq!(average_daily_spend(&[]), Money::zero());

        let expenses = vec![
            expense("a", "2024-03-01", 100, "Food"),
            expense("b", "2024-03-02", 50, "Food"),
        ];
        assert_eq!(average_daily_spend(&totals_by_day(&expenses)), Money::from_major(75));
    }

    #[test]
    fn test_bar_ratio() {
        assert_eq!(bar_ratio(Money::from_major(50), Money::from_major(200)), 25.0);
        assert_eq!(bar_ratio(Money::from_major(300), Money::from_major(200)), 100.0);
        assert_eq!(bar_ratio(Money::from_major(50), Money::zero()), 0.0);
        assert_eq!(bar_ratio(Money::from_major(-5), Money::from_major(10)), 0.0);
    }
}
