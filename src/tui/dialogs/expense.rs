//! Add-expense dialog

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::Category;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;
use crate::views::DraftField;

/// Render the add-expense form
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(60, 13, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Expense ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Date
            Constraint::Length(1), // Category
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Category hint
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.add_form;
    for (i, field) in DraftField::ALL.iter().enumerate() {
        let placeholder = match field {
            DraftField::Title => "What was it?",
            DraftField::Amount => "e.g. 1500 or 12.50",
            DraftField::Date => "YYYY-MM-DD",
            DraftField::Category => "e.g. Food",
        };
        let input = TextInput::new()
            .label(format!("{:>8}", field.label()))
            .placeholder(placeholder)
            .content(form.draft.field(*field))
            .focused(form.field == *field);
        frame.render_widget(input, chunks[i]);
    }

    let names: Vec<&str> = Category::STANDARD.iter().map(|c| c.name()).collect();
    let hint = Paragraph::new(format!("Categories: {}", names.join(", ")))
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    frame.render_widget(hint, chunks[5]);

    let buttons = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" Next field  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(buttons), chunks[6]);
}
