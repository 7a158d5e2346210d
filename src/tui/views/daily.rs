//! Daily overview view

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::display::report::format_bar;
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

/// Render per-day totals for the selected period
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let overview = app.daily_overview();
    let currency = &app.settings.currency;
    let layout = MainPanelLayout::new(area);

    let header = Paragraph::new(format!(
        "Total: {}   Days: {}   Average per day: {}",
        currency.format(overview.total),
        overview.total_days(),
        currency.format(overview.average_daily)
    ))
    .block(
        Block::default()
            .title(" Daily overview ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, layout.header);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if overview.days.is_empty() {
        let text = Paragraph::new("No expenses in this period")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, layout.content);
        return;
    }

    let rows: Vec<Row> = overview
        .days
        .iter()
        .map(|day| {
            Row::new(vec![
                Cell::from(day.date.format("%a %Y-%m-%d").to_string()),
                Cell::from(format_bar(day.ratio, 24)).style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:>12}", currency.format(day.total)))
                    .style(Style::default().fg(Color::Yellow)),
                Cell::from(format!("{} item{}", day.count, if day.count == 1 { "" } else { "s" })),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(26),
        Constraint::Length(14),
        Constraint::Min(8),
    ];
    frame.render_widget(Table::new(rows, widths).block(block), layout.content);
}
