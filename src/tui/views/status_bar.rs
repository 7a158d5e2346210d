//! Status bar view
//!
//! Shows this month's spending against the goal, the latest status message
//! and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::reports::{current_month_total, GoalProgress};
use crate::tui::app::{App, InputMode};

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let current = current_month_total(app.list.expenses(), app.today);
    let progress = GoalProgress::compute(current, app.settings.monthly_goal());
    let currency = &app.settings.currency;

    let mut spans = vec![Span::styled(" Month: ", Style::default().fg(Color::White))];

    let color = if progress.is_over_budget() {
        Color::Red
    } else {
        Color::Green
    };
    spans.push(Span::styled(
        currency.format(current),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    if let GoalProgress::Tracking { goal, .. } = progress {
        spans.push(Span::raw(format!(" / {}", currency.format(goal))));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = match app.input_mode {
        InputMode::Editing => " Enter:Save  Esc:Cancel ",
        InputMode::Normal => " m/M:Month  y/Y:Year  1-3:View  ?:Help  q:Quit ",
    };

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize).saturating_sub(left_len + hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
