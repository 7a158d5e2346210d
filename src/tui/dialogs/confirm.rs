//! Confirmation dialog
//!
//! Yes/no before deleting an expense

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::display::report::truncate;
use crate::models::ExpenseId;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the delete confirmation for `id`
pub fn render(frame: &mut Frame, app: &App, id: ExpenseId) {
    let area = centered_rect_fixed(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let message = match app.list.expenses().iter().find(|e| e.id == id) {
        Some(expense) => format!(
            "Delete '{}' ({})?",
            truncate(&expense.title, 24),
            app.settings.currency.format(expense.amount)
        ),
        None => format!("Delete {}?", id),
    };

    let block = Block::default()
        .title(" Confirm ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]", Style::default().fg(Color::Green)),
            Span::raw(" Yes  "),
            Span::styled("[N]", Style::default().fg(Color::Red)),
            Span::raw(" No  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
