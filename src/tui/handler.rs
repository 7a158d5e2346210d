//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the open
//! dialog, the input mode and the active view.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, InputMode};
use super::event::Event;
use super::widgets::TextInput;
use crate::reports::{AmountRange, SortKey};
use crate::views::DraftField;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Tick => {
            app.tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(());
    }

    if app.has_dialog() {
        handle_dialog_key(app, key);
        return Ok(());
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Editing => handle_row_edit_key(app, key),
    }
    Ok(())
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    // Global keys (work in every view)
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Char('1') => app.switch_view(ActiveView::Dashboard),
        KeyCode::Char('2') => app.switch_view(ActiveView::Expenses),
        KeyCode::Char('3') => app.switch_view(ActiveView::Daily),
        KeyCode::Tab => app.switch_view(app.active_view.next()),
        KeyCode::Char('m') => app.cycle_month(true),
        KeyCode::Char('M') => app.cycle_month(false),
        KeyCode::Char('y') => app.cycle_year(true),
        KeyCode::Char('Y') => app.cycle_year(false),
        KeyCode::Char('g') => app.open_dialog(ActiveDialog::Goal),
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_dialog(ActiveDialog::AddExpense),
        KeyCode::Char('r') => {
            app.reload();
            app.set_status("Reloaded");
        }
        _ if app.active_view == ActiveView::Expenses => handle_list_key(app, key),
        _ => {}
    }
}

/// Keys specific to the expense list
fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.list.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.list.move_selection(-1),
        KeyCode::PageDown => app.list.move_selection(10),
        KeyCode::PageUp => app.list.move_selection(-10),
        KeyCode::Home => app.list.move_selection(isize::MIN / 2),
        KeyCode::End => app.list.move_selection(isize::MAX / 2),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('s') => app.list.toggle_sort(SortKey::Date),
        KeyCode::Char('S') => app.list.toggle_sort(SortKey::Amount),
        KeyCode::Char('f') => app.open_dialog(ActiveDialog::AmountFilter),
        KeyCode::Char('x') => {
            app.list.set_amount_range(AmountRange::default());
            app.set_status("Amount filter cleared");
        }
        _ => {}
    }
}

/// Keys while a row is being edited in place
fn handle_row_edit_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.save_edit(),
        KeyCode::Tab => app.edit_field = app.edit_field.next(),
        KeyCode::BackTab => app.edit_field = app.edit_field.prev(),
        _ => {
            let field = app.edit_field;
            if let Some(draft) = app.editor.draft_mut() {
                edit_text(draft.field_mut(field), key);
            }
        }
    }
}

/// Append or remove characters at the end of a draft field
fn edit_text(text: &mut String, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
        KeyCode::Backspace => {
            text.pop();
        }
        _ => {}
    }
}

/// Handle keys when a dialog is open
fn handle_dialog_key(app: &mut App, key: KeyEvent) {
    match app.active_dialog {
        ActiveDialog::Help => app.close_dialog(),
        ActiveDialog::ConfirmDelete(id) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.delete(id),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::AddExpense => handle_add_form_key(app, key),
        ActiveDialog::AmountFilter => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => app.submit_amount_filter(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                app.range_form.editing_max = !app.range_form.editing_max;
            }
            _ => handle_input_key(app.range_form.focused_mut(), key),
        },
        ActiveDialog::Goal => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => app.submit_goal(),
            _ => handle_input_key(&mut app.goal_input, key),
        },
        ActiveDialog::None => {}
    }
}

fn handle_add_form_key(app: &mut App, key: KeyEvent) {
    let field = app.add_form.field;
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        // Enter advances until the last field, then saves
        KeyCode::Enter if field == DraftField::Category => app.submit_add(),
        KeyCode::Enter | KeyCode::Tab | KeyCode::Down => app.add_form.field = field.next(),
        KeyCode::BackTab | KeyCode::Up => app.add_form.field = field.prev(),
        _ => edit_text(app.add_form.draft.field_mut(field), key),
    }
}

/// Cursor-aware editing for a text input
fn handle_input_key(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_start(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExpensePaths, Settings};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, Settings::default())
    }

    #[test]
    fn test_add_then_edit_then_delete_with_keys() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_view, ActiveView::Expenses);

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Coffee");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "500");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Food");
        press(&mut app, KeyCode::Enter);
        assert!(!app.has_dialog());
        assert_eq!(app.list.expenses().len(), 1);

        press(&mut app, KeyCode::Char('e'));
        assert!(app.editor.is_editing());
        for _ in 0.."Coffee".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "Tea");
        press(&mut app, KeyCode::Enter);
        assert!(!app.editor.is_editing());
        assert_eq!(app.list.expenses()[0].title, "Tea");

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.list.expenses().is_empty());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_escape_cancels_row_edit() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "Bus");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "250");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "Transportation");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, " ride");
        press(&mut app, KeyCode::Esc);

        assert!(!app.editor.is_editing());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.list.expenses()[0].title, "Bus");
    }

    #[test]
    fn test_typing_in_edit_mode_does_not_trigger_commands() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Other");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "q2m");

        assert!(!app.should_quit);
        assert_eq!(app.active_view, ActiveView::Expenses);
        assert_eq!(app.period().month, None);
        assert_eq!(app.editor.draft().unwrap().title, "xq2m");
    }

    #[test]
    fn test_sort_keys_toggle() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);
        press(&mut app, KeyCode::Char('2'));

        press(&mut app, KeyCode::Char('S'));
        assert_eq!(
            app.list.query().sort,
            Some((SortKey::Amount, crate::reports::SortOrder::Descending))
        );
        press(&mut app, KeyCode::Char('S'));
        assert_eq!(
            app.list.query().sort,
            Some((SortKey::Amount, crate::reports::SortOrder::Ascending))
        );
    }

    #[test]
    fn test_goal_dialog_keys() {
        let (_tmp, storage, mut settings) = setup();
        {
            let mut app = App::new(&storage, &mut settings);
            press(&mut app, KeyCode::Char('g'));
            assert_eq!(app.active_dialog, ActiveDialog::Goal);
            type_str(&mut app, "1500");
            press(&mut app, KeyCode::Enter);
            assert!(!app.has_dialog());
        }
        assert_eq!(
            settings.monthly_goal(),
            Some(crate::models::Money::from_major(1500))
        );
    }

    #[test]
    fn test_quit_keys() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
