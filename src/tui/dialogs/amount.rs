//! Amount range filter dialog

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;

/// Render the min/max amount inputs
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(44, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Amount filter ")
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
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.range_form;
    frame.render_widget(
        form.min
            .clone()
            .placeholder("no minimum")
            .focused(!form.editing_max),
        chunks[0],
    );
    frame.render_widget(
        form.max
            .clone()
            .placeholder("no maximum")
            .focused(form.editing_max),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("Tab switch  Enter apply  Esc cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}
