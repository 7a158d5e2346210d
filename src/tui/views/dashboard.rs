//! Dashboard view
//!
//! Period totals, monthly goal gauge, and category and month breakdowns.

use std::fmt::Display;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::display::report::{format_bar, format_percentage, truncate};
use crate::models::{CurrencyFormat, Money};
use crate::reports::{bar_ratio, GoalProgress, GroupTotal};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

/// Render the dashboard
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let dashboard = app.dashboard();
    let currency = &app.settings.currency;
    let layout = DashboardLayout::new(area);

    let years = if dashboard.years.is_empty() {
        "none".to_string()
    } else {
        dashboard
            .years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let summary = vec![
        Line::from(vec![
            Span::raw("Total spent: "),
            Span::styled(
                currency.format(dashboard.filtered_total),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({} expenses)", dashboard.count),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("This month:  "),
            Span::styled(
                currency.format(dashboard.current_month_total),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!("   Years with data: {}", years),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(panel(format!(" {} ", dashboard.period))),
        layout.summary,
    );

    render_goal(frame, &dashboard.goal, currency, layout.goal);

    render_groups(
        frame,
        " By category ",
        &dashboard.categories,
        dashboard.max_category_total(),
        currency,
        layout.categories,
    );
    render_groups(
        frame,
        " By month ",
        &dashboard.months,
        dashboard.max_month_total(),
        currency,
        layout.months,
    );
}

fn panel(title: String) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn render_goal(frame: &mut Frame, goal: &GoalProgress, currency: &CurrencyFormat, area: Rect) {
    let block = panel(" Monthly goal (g to edit) ".to_string());

    let GoalProgress::Tracking { current, goal: target, .. } = goal else {
        let text = Paragraph::new("No monthly goal set")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    };

    let color = if goal.is_over_budget() {
        Color::Red
    } else if goal.percent() >= 80.0 {
        Color::Yellow
    } else {
        Color::Green
    };
    let label = match goal.over_by() {
        Some(over) => format!(
            "{} of {} - exceeded by {}",
            currency.format(*current),
            currency.format(*target),
            format_percentage(over)
        ),
        None => format!(
            "{} of {} ({})",
            currency.format(*current),
            currency.format(*target),
            format_percentage(goal.percent())
        ),
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(goal.bar_fill() / 100.0)
        .label(label);
    frame.render_widget(gauge, area);
}

fn render_groups<K: Display>(
    frame: &mut Frame,
    title: &str,
    groups: &[GroupTotal<K>],
    max: Money,
    currency: &CurrencyFormat,
    area: Rect,
) {
    let block = panel(title.to_string());

    if groups.is_empty() {
        let text = Paragraph::new("No expenses in this period")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let lines: Vec<Line> = groups
        .iter()
        .map(|group| {
            Line::from(vec![
                Span::raw(format!("{:<16}", truncate(&group.key.to_string(), 16))),
                Span::styled(
                    format_bar(bar_ratio(group.total, max), 12),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!(" {:>12}", currency.format(group.total)),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
