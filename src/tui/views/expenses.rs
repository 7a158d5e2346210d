//! Expense list view
//!
//! Filtered, sorted table of expenses. The row being edited is drawn with
//! its draft values and the focused field highlighted.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::report::truncate;
use crate::models::{Expense, Money};
use crate::reports::{SortKey, SortOrder};
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;
use crate::views::{DraftField, ExpenseDraft};

/// Render the expense list
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area);
    render_header(frame, app, layout.header);
    render_table(frame, app, layout.content);
}

fn sort_label(app: &App) -> String {
    match app.list.query().sort {
        Some((key, order)) => {
            let key = match key {
                SortKey::Date => "date",
                SortKey::Amount => "amount",
            };
            let arrow = match order {
                SortOrder::Ascending => "↑",
                SortOrder::Descending => "↓",
            };
            format!("{} {}", key, arrow)
        }
        None => "none".to_string(),
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let range = app.list.query().amount;
    let currency = &app.settings.currency;
    let bound = |b: Option<Money>| b.map(|m| currency.format(m)).unwrap_or_else(|| "-".into());

    let block = Block::default()
        .title(format!(
            " {} shown, total {} ",
            app.list.visible().len(),
            currency.format(app.list.visible_total())
        ))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = if app.editor.is_editing() {
        "Editing: Tab next field  Enter save  Esc cancel".to_string()
    } else {
        format!(
            "Sort: {}  Amount: {} .. {}   a:Add  e:Edit  d:Delete  s/S:Sort  f:Amount filter",
            sort_label(app),
            bound(range.min),
            bound(range.max)
        )
    };

    let paragraph = Paragraph::new(hints)
        .block(block)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let expenses = app.list.visible();
    if expenses.is_empty() {
        let text = Paragraph::new("No expenses. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(20),    // Title
        Constraint::Length(18), // Category
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Title").style(bold),
        Cell::from("Category").style(bold),
        Cell::from(Line::from("Amount").right_aligned()).style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let editing = app.editor.editing_id();
    let rows: Vec<Row> = expenses
        .iter()
        .map(|expense| match (editing, app.editor.draft()) {
            (Some(id), Some(draft)) if id == expense.id => edit_row(draft, app.edit_field),
            _ => view_row(expense, app),
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(app.list.selected_index());
    frame.render_stateful_widget(table, area, &mut state);
}

fn view_row<'a>(expense: &Expense, app: &App) -> Row<'a> {
    Row::new(vec![
        Cell::from(expense.date.format("%Y-%m-%d").to_string()),
        Cell::from(truncate(&expense.title, 40)),
        Cell::from(truncate(expense.category.name(), 18)),
        Cell::from(Line::from(app.settings.currency.format(expense.amount)).right_aligned())
            .style(Style::default().fg(Color::Yellow)),
    ])
}

fn edit_row<'a>(draft: &ExpenseDraft, focused: DraftField) -> Row<'a> {
    let cell = |field: DraftField| {
        let mut text = draft.field(field).to_string();
        let style = if field == focused {
            text.push('_');
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White).bg(Color::Blue)
        };
        Cell::from(Span::styled(text, style))
    };

    Row::new(vec![
        cell(DraftField::Date),
        cell(DraftField::Title),
        cell(DraftField::Category),
        cell(DraftField::Amount),
    ])
}
