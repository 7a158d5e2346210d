//! Help dialog
//!
//! Shows keyboard shortcuts for the active view

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect_fixed;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(56, 24, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_lines(app.active_view))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn heading(text: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text.to_string(),
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("1/2/3, Tab", "Dashboard / Expenses / Daily"),
        key_line("m/M", "Next/previous month (or all)"),
        key_line("y/Y", "Next/previous year (or all)"),
        key_line("g", "Set monthly goal"),
        key_line("a", "Add expense"),
        key_line("r", "Reload from disk"),
        Line::from(""),
    ];

    if view == ActiveView::Expenses {
        lines.push(heading("Expense List"));
        lines.push(Line::from(""));
        lines.push(key_line("j/k", "Move selection"));
        lines.push(key_line("e/Enter", "Edit row in place"));
        lines.push(key_line("d/Del", "Delete expense"));
        lines.push(key_line("s", "Sort by date (again: flip)"));
        lines.push(key_line("S", "Sort by amount (again: flip)"));
        lines.push(key_line("f", "Amount range filter"));
        lines.push(key_line("x", "Clear amount filter"));
        lines.push(Line::from(""));
        lines.push(heading("While Editing"));
        lines.push(Line::from(""));
        lines.push(key_line("Tab/S-Tab", "Next/previous field"));
        lines.push(key_line("Enter", "Save"));
        lines.push(key_line("Esc", "Cancel"));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )]));

    lines
}

/// Create a formatted key line
fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
