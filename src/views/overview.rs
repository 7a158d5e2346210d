//! Daily overview snapshot

use chrono::NaiveDate;

use crate::models::{Expense, Money};
use crate::reports::{average_daily_spend, bar_ratio, total, totals_by_day};

/// One day in the overview
#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub date: NaiveDate,
    pub total: Money,
    pub count: usize,
    /// Share of the busiest day, 0..=100
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyOverview {
    /// Newest day first
    pub days: Vec<DayRow>,
    pub total: Money,
    pub average_daily: Money,
}

impl DailyOverview {
    pub fn build(expenses: &[Expense]) -> Self {
        let daily = totals_by_day(expenses);
        let max = daily.iter().map(|d| d.total).max().unwrap_or_default();
        let average_daily = average_daily_spend(&daily);

        let days = daily
            .into_iter()
            .map(|d| DayRow {
                date: d.key,
                total: d.total,
                count: d.count,
                ratio: bar_ratio(d.total, max),
            })
            .collect();

        Self {
            days,
            total: total(expenses),
            average_daily,
        }
    }

    pub fn total_days(&self) -> usize {
        self.days.len()
    }
}
