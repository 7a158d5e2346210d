//! TUI Views module
//!
//! The dashboard, the expense list and the daily overview, plus the tab
//! header and status bar around them.

pub mod daily;
pub mod dashboard;
pub mod expenses;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Dashboard => dashboard::render(frame, app, layout.main),
        ActiveView::Expenses => expenses::render(frame, app, layout.main),
        ActiveView::Daily => daily::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// View tabs with the period selector in the title
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!(" {} {} ", i + 1, view.title())))
        .collect();
    let selected = ActiveView::ALL
        .iter()
        .position(|v| *v == app.active_view)
        .unwrap_or(0);

    let period = Line::from(vec![
        Span::raw(" Period: "),
        Span::styled(
            app.period().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .title(" Expense Tracker ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .title(period.right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let tabs = Tabs::new(titles)
        .block(block)
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );

    frame.render_widget(tabs, area);
}

fn render_dialog(frame: &mut Frame, app: &mut App) {
    match app.active_dialog {
        ActiveDialog::AddExpense => dialogs::expense::render(frame, app),
        ActiveDialog::AmountFilter => dialogs::amount::render(frame, app),
        ActiveDialog::Goal => dialogs::goal::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => dialogs::confirm::render(frame, app, id),
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::None => {}
    }
}
