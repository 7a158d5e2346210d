//! Report formatting utilities for terminal output
//!
//! Text renderings of the dashboard, the category and monthly breakdowns,
//! the daily overview and goal progress.

use std::fmt::Display;

use crate::models::{CurrencyFormat, Money};
use crate::reports::{bar_ratio, GoalProgress, GroupTotal};
use crate::views::{Dashboard, DailyOverview};

const BAR_WIDTH: usize = 30;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A horizontal bar for a 0..=100 fill percentage
pub fn format_bar(fill: f64, width: usize) -> String {
    if fill <= 0.0 {
        return "░".repeat(width);
    }
    let filled = ((fill / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Goal status block
pub fn format_goal(progress: &GoalProgress, currency: &CurrencyFormat) -> String {
    let GoalProgress::Tracking { current, goal, .. } = progress else {
        return "No monthly goal set. Use `expenses goal set <amount>` to add one.\n".to_string();
    };

    let mut output = String::new();
    output.push_str(&format!(
        "Monthly goal: {} of {} ({})\n",
        currency.format(*current),
        currency.format(*goal),
        format_percentage(progress.percent())
    ));
    output.push_str(&format!("[{}]\n", format_bar(progress.bar_fill(), BAR_WIDTH)));

    match (progress.over_by(), progress.remaining()) {
        (Some(over), _) => output.push_str(&format!(
            "You've exceeded your monthly goal by {}\n",
            format_percentage(over)
        )),
        (None, Some(left)) => {
            output.push_str(&format!("{} left this month\n", currency.format(left)))
        }
        (None, None) => {}
    }

    output
}

/// Rows of `label  bar  amount  share` for a set of group totals
pub fn format_group_rows<K: Display>(
    groups: &[GroupTotal<K>],
    currency: &CurrencyFormat,
) -> String {
    if groups.is_empty() {
        return "No expenses.\n".to_string();
    }

    let max = groups.iter().map(|g| g.total).max().unwrap_or_default();
    let total: Money = groups.iter().map(|g| g.total).sum();
    let label_width = groups
        .iter()
        .map(|g| g.key.to_string().chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut output = String::new();
    for group in groups {
        let share = bar_ratio(group.total, total);
        output.push_str(&format!(
            "{:<label_width$}  {}  {:>14}  {:>5}  ({} item{})\n",
            group.key.to_string(),
            format_bar(bar_ratio(group.total, max), 20),
            currency.format(group.total),
            format_percentage(share),
            group.count,
            if group.count == 1 { "" } else { "s" },
            label_width = label_width,
        ));
    }
    output
}

/// The dashboard: totals, goal, categories and months
pub fn format_dashboard(dashboard: &Dashboard, currency: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense Dashboard: {}\n", dashboard.period));
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format!(
        "Total spent:       {} ({} expense{})\n",
        currency.format(dashboard.filtered_total),
        dashboard.count,
        if dashboard.count == 1 { "" } else { "s" }
    ));
    output.push_str(&format!(
        "This month:        {}\n\n",
        currency.format(dashboard.current_month_total)
    ));

    output.push_str(&format_goal(&dashboard.goal, currency));

    output.push_str("\nBy category\n");
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format_group_rows(&dashboard.categories, currency));

    output.push_str("\nBy month\n");
    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format_group_rows(&dashboard.months, currency));

    if !dashboard.years.is_empty() {
        let years: Vec<String> = dashboard.years.iter().map(|y| y.to_string()).collect();
        output.push_str(&format!("\nYears with data: {}\n", years.join(", ")));
    }

    output
}

/// Per-day totals, newest first
pub fn format_daily_overview(overview: &DailyOverview, currency: &CurrencyFormat) -> String {
    if overview.days.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Daily Overview\n");
    output.push_str(&separator(60));
    output.push('\n');

    for day in &overview.days {
        output.push_str(&format!(
            "{}  {}  {:>14}  ({} expense{})\n",
            day.date.format("%Y-%m-%d"),
            format_bar(day.ratio, 20),
            currency.format(day.total),
            day.count,
            if day.count == 1 { "" } else { "s" }
        ));
    }

    output.push_str(&separator(60));
    output.push('\n');
    output.push_str(&format!(
        "Total: {}   Days: {}   Average per day: {}\n",
        currency.format(overview.total),
        overview.total_days(),
        currency.format(overview.average_daily)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{expense, fixture};
    use crate::reports::{totals_by_category, PeriodFilter};
    use chrono::NaiveDate;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.34), "5.3%");
        assert_eq!(format_percentage(150.0), "150%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 10), "█████░░░░░");
        assert_eq!(format_bar(0.0, 4), "░░░░");
        assert_eq!(format_bar(250.0, 4), "████");
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("Kaffi", 10), "Kaffi");
        assert_eq!(truncate("Þjóðhátíð í Eyjum", 8), "Þjóðh...");
        assert_eq!(truncate("abcdef", 2), "..");
    }

    #[test]
    fn test_format_goal_states() {
        let currency = CurrencyFormat::default();
        assert!(format_goal(&GoalProgress::NoGoal, &currency).contains("No monthly goal"));

        let over = GoalProgress::compute(Money::from_major(150), Some(Money::from_major(100)));
        let text = format_goal(&over, &currency);
        assert!(text.contains("150 kr of 100 kr (150%)"));
        assert!(text.contains("exceeded your monthly goal by 50%"));

        let under = GoalProgress::compute(Money::from_major(40), Some(Money::from_major(100)));
        assert!(format_goal(&under, &currency).contains("60 kr left this month"));
    }

    #[test]
    fn test_group_rows() {
        let expenses = vec![
            expense("a", "2024-03-01", 100, "Food"),
            expense("b", "2024-03-02", 50, "Food"),
            expense("c", "2024-03-03", 30, "Transportation"),
        ];
        let text = format_group_rows(&totals_by_category(&expenses), &CurrencyFormat::default());
        assert!(text.contains("Food"));
        assert!(text.contains("150 kr"));
        assert!(text.contains("(2 items)"));
        assert!(text.contains("(1 item)"));
    }

    #[test]
    fn test_dashboard_text() {
        let dashboard = Dashboard::build(
            &fixture(),
            PeriodFilter::new(Some(3), Some(2024)).unwrap(),
            None,
            NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(),
        );
        let text = format_dashboard(&dashboard, &CurrencyFormat::default());
        assert!(text.contains("Expense Dashboard: March 2024"));
        assert!(text.contains("Total spent:       2.550 kr (3 expenses)"));
        assert!(text.contains("March 2024"));
        assert!(text.contains("Years with data: 2023, 2024"));
    }

    #[test]
    fn test_daily_overview_text() {
        let overview = DailyOverview::build(&[
            expense("a", "2024-03-01", 100, "Food"),
            expense("b", "2024-03-02", 50, "Food"),
        ]);
        let text = format_daily_overview(&overview, &CurrencyFormat::default());
        assert!(text.contains("2024-03-02"));
        assert!(text.contains("Average per day: 75 kr"));
        assert!(format_daily_overview(&DailyOverview::build(&[]), &CurrencyFormat::default())
            .contains("No expenses recorded"));
    }
}
