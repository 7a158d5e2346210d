//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Every mutation goes through [`ExpenseService`] first; the local list is
//! only touched after the store call succeeds.

use chrono::{Local, NaiveDate};

use crate::config::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, Money};
use crate::reports::{distinct_years, AmountRange, PeriodFilter};
use crate::services::ExpenseService;
use crate::storage::Storage;
use crate::views::{DailyOverview, Dashboard, DraftField, ExpenseDraft, ExpenseListState, RowEditor};

use super::widgets::TextInput;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Expenses,
    Daily,
}

impl ActiveView {
    pub const ALL: [ActiveView; 3] = [
        ActiveView::Dashboard,
        ActiveView::Expenses,
        ActiveView::Daily,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Expenses => "Expenses",
            Self::Daily => "Daily",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Expenses,
            Self::Expenses => Self::Daily,
            Self::Daily => Self::Dashboard,
        }
    }
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// A row or form field is receiving text
    Editing,
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    AmountFilter,
    Goal,
    ConfirmDelete(ExpenseId),
    Help,
}

/// The add-expense form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseForm {
    pub draft: ExpenseDraft,
    pub field: DraftField,
}

impl ExpenseForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            draft: ExpenseDraft::new(today),
            field: DraftField::Title,
        }
    }
}

/// The amount range dialog: two inputs, one focused
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeForm {
    pub min: TextInput,
    pub max: TextInput,
    pub editing_max: bool,
}

impl RangeForm {
    pub fn focused_mut(&mut self) -> &mut TextInput {
        if self.editing_max {
            &mut self.max
        } else {
            &mut self.min
        }
    }
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a mut Settings,
    pub should_quit: bool,
    pub active_view: ActiveView,
    pub input_mode: InputMode,
    pub active_dialog: ActiveDialog,

    /// Local copy of the expenses with filter, sort and selection
    pub list: ExpenseListState,
    /// Inline editor for the selected row
    pub editor: RowEditor,
    /// Field of the inline editor receiving input
    pub edit_field: DraftField,

    pub add_form: ExpenseForm,
    pub range_form: RangeForm,
    pub goal_input: TextInput,

    pub status_message: Option<String>,
    /// Ticks left before the status message is cleared
    status_ttl: u8,
    pub today: NaiveDate,
}

const STATUS_TICKS: u8 = 16;

impl<'a> App<'a> {
    /// Create the app and load the current expense listing
    pub fn new(storage: &'a Storage, settings: &'a mut Settings) -> Self {
        let today = Local::now().date_naive();
        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            input_mode: InputMode::default(),
            active_dialog: ActiveDialog::default(),
            list: ExpenseListState::default(),
            editor: RowEditor::default(),
            edit_field: DraftField::Title,
            add_form: ExpenseForm::new(today),
            range_form: RangeForm::default(),
            goal_input: TextInput::new().label("Monthly goal"),
            status_message: None,
            status_ttl: 0,
            today,
        };
        app.reload();
        app
    }

    fn service(&self) -> ExpenseService<'a> {
        ExpenseService::new(self.storage).with_user_id(self.settings.user_id.clone())
    }

    /// Replace the local copy with a fresh store listing
    pub fn reload(&mut self) {
        match self.service().list() {
            Ok(expenses) => {
                self.list.replace_all(expenses);
                if self.list.selected_id().is_none() {
                    self.list.move_selection(0);
                }
            }
            Err(e) => self.set_status(format!("Error loading expenses: {}", e)),
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ttl = STATUS_TICKS;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_ttl = 0;
    }

    /// Count down the status message lifetime
    pub fn tick(&mut self) {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status_message = None;
            }
        }
    }

    pub fn switch_view(&mut self, view: ActiveView) {
        self.cancel_edit();
        self.active_view = view;
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.cancel_edit();
        match dialog {
            ActiveDialog::AddExpense => {
                self.add_form = ExpenseForm::new(self.today);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::AmountFilter => {
                let range = self.list.query().amount;
                self.range_form = RangeForm {
                    min: TextInput::new()
                        .label("Min")
                        .content(range.min.map(|m| m.to_string()).unwrap_or_default()),
                    max: TextInput::new()
                        .label("Max")
                        .content(range.max.map(|m| m.to_string()).unwrap_or_default()),
                    editing_max: false,
                };
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::Goal => {
                let current = self
                    .settings
                    .monthly_goal()
                    .map(|g| g.to_string())
                    .unwrap_or_default();
                self.goal_input.set_value(current);
                self.input_mode = InputMode::Editing;
            }
            ActiveDialog::ConfirmDelete(_) | ActiveDialog::Help | ActiveDialog::None => {}
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.input_mode = InputMode::Normal;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn period(&self) -> PeriodFilter {
        self.list.query().period
    }

    /// Step the month selector: all, January ... December, all
    pub fn cycle_month(&mut self, forward: bool) {
        let current = self.period().month;
        let month = if forward {
            match current {
                None => Some(1),
                Some(12) => None,
                Some(m) => Some(m + 1),
            }
        } else {
            match current {
                None => Some(12),
                Some(1) => None,
                Some(m) => Some(m - 1),
            }
        };
        self.set_period(PeriodFilter {
            month,
            ..self.period()
        });
    }

    /// Step the year selector through "all" and the years that have data
    pub fn cycle_year(&mut self, forward: bool) {
        let mut options: Vec<Option<i32>> = vec![None];
        options.extend(distinct_years(self.list.expenses()).into_iter().map(Some));

        let position = options
            .iter()
            .position(|y| *y == self.period().year)
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % options.len()
        } else {
            (position + options.len() - 1) % options.len()
        };
        self.set_period(PeriodFilter {
            year: options[next],
            ..self.period()
        });
    }

    fn set_period(&mut self, period: PeriodFilter) {
        self.list.set_period(period);
        if self.list.selected_index().is_none() {
            self.list.move_selection(0);
        }
    }

    /// Validate the add form and create the expense
    pub fn submit_add(&mut self) {
        let result = self
            .add_form
            .draft
            .validate()
            .and_then(|new| self.service().create(new));

        match result {
            Ok(expense) => {
                self.set_status(format!("Added {}", expense.title));
                self.list.select(Some(expense.id));
                self.list.apply_created(expense);
                self.close_dialog();
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Start editing the selected row in place
    pub fn begin_edit(&mut self) {
        if let Some(expense) = self.list.selected_expense().cloned() {
            self.editor.begin_edit(&expense);
            self.edit_field = DraftField::Title;
            self.input_mode = InputMode::Editing;
        }
    }

    /// Save the inline edit; a validation error keeps the row in edit mode
    pub fn save_edit(&mut self) {
        let (id, new) = match self.editor.save() {
            Ok(update) => update,
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };
        self.input_mode = InputMode::Normal;

        match self.service().update(id, new) {
            Ok(expense) => {
                self.set_status(format!("Updated {}", expense.title));
                self.list.apply_updated(expense);
            }
            Err(e) => self.set_status(format!("Update failed: {}", e)),
        }
    }

    pub fn cancel_edit(&mut self) {
        if self.editor.is_editing() {
            self.editor.cancel();
            self.input_mode = InputMode::Normal;
        }
    }

    /// Ask before deleting the selected row
    pub fn request_delete(&mut self) {
        if let Some(id) = self.list.selected_id() {
            self.open_dialog(ActiveDialog::ConfirmDelete(id));
        }
    }

    pub fn delete(&mut self, id: ExpenseId) {
        let index = self.list.selected_index();
        match self.service().delete(id) {
            Ok(expense) => {
                self.list.apply_deleted(id);
                self.set_status(format!("Deleted {}", expense.title));
                // Keep the cursor near where the deleted row was
                if let Some(index) = index {
                    self.list.move_selection(0);
                    self.list.move_selection(index as isize);
                }
            }
            Err(e) => self.set_status(format!("Delete failed: {}", e)),
        }
        self.close_dialog();
    }

    /// Parse and store the goal from the goal dialog
    pub fn submit_goal(&mut self) {
        match self.save_goal() {
            Ok(()) => {
                let message = match self.settings.monthly_goal() {
                    Some(goal) => format!("Monthly goal set to {}", self.settings.format_money(goal)),
                    None => "Monthly goal removed".to_string(),
                };
                self.set_status(message);
                self.close_dialog();
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn save_goal(&mut self) -> ExpenseResult<()> {
        let input = self.goal_input.value().trim();
        let goal = if input.is_empty() {
            Money::zero()
        } else {
            Money::parse(input)
                .map_err(|e| ExpenseError::Validation(format!("Invalid goal: {}", e)))?
        };
        self.settings.set_monthly_goal(goal)?;
        self.settings.save(self.storage.paths())
    }

    /// Apply the amount range dialog; blank bounds are open
    pub fn submit_amount_filter(&mut self) {
        let parse = |input: &TextInput| -> ExpenseResult<Option<Money>> {
            let text = input.value().trim();
            if text.is_empty() {
                return Ok(None);
            }
            Money::parse(text)
                .map(Some)
                .map_err(|e| ExpenseError::Validation(format!("Invalid amount '{}': {}", text, e)))
        };

        match (parse(&self.range_form.min), parse(&self.range_form.max)) {
            (Ok(min), Ok(max)) => {
                self.list.set_amount_range(AmountRange::new(min, max));
                if self.list.selected_index().is_none() {
                    self.list.move_selection(0);
                }
                self.close_dialog();
            }
            (Err(e), _) | (_, Err(e)) => self.set_status(e.to_string()),
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(
            self.list.expenses(),
            self.period(),
            self.settings.monthly_goal(),
            self.today,
        )
    }

    pub fn daily_overview(&self) -> DailyOverview {
        DailyOverview::build(&self.period().apply(self.list.expenses()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpensePaths;
    use crate::models::{Category, NewExpense};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage, Settings::default())
    }

    fn seed(storage: &Storage, title: &str, date: &str, amount: i64) {
        ExpenseService::new(storage)
            .create(NewExpense::new(
                title,
                Money::from_major(amount),
                NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                Category::Food,
            ))
            .unwrap();
    }

    fn type_into(app: &mut App, text: &str) {
        let field = app.add_form.field;
        app.add_form.draft.field_mut(field).push_str(text);
    }

    #[test]
    fn test_new_loads_and_selects_first_row() {
        let (_tmp, storage, mut settings) = setup();
        seed(&storage, "Coffee", "2024-03-01", 500);
        seed(&storage, "Lunch", "2024-03-20", 1800);

        let app = App::new(&storage, &mut settings);
        assert_eq!(app.list.expenses().len(), 2);
        assert_eq!(app.list.selected_expense().unwrap().title, "Lunch");
    }

    #[test]
    fn test_submit_add_creates_and_prepends() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);

        app.open_dialog(ActiveDialog::AddExpense);
        type_into(&mut app, "Coffee");
        app.add_form.field = DraftField::Amount;
        type_into(&mut app, "500");
        app.add_form.field = DraftField::Category;
        type_into(&mut app, "Food");
        app.submit_add();

        assert!(!app.has_dialog());
        assert_eq!(app.list.expenses()[0].title, "Coffee");
        assert_eq!(app.list.selected_expense().unwrap().title, "Coffee");
        assert_eq!(storage.expenses.count().unwrap(), 1);
    }

    #[test]
    fn test_submit_add_invalid_keeps_dialog_open() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);

        app.open_dialog(ActiveDialog::AddExpense);
        app.submit_add();

        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);
        assert_eq!(app.status_message.as_deref(), Some("Validation error: Title is required"));
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_inline_edit_roundtrip() {
        let (_tmp, storage, mut settings) = setup();
        seed(&storage, "Coffee", "2024-03-01", 500);
        let mut app = App::new(&storage, &mut settings);

        app.begin_edit();
        assert_eq!(app.input_mode, InputMode::Editing);
        let draft = app.editor.draft_mut().unwrap();
        draft.title = "Espresso".into();
        app.save_edit();

        assert!(!app.editor.is_editing());
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.list.expenses()[0].title, "Espresso");
        assert_eq!(storage.expenses.get_all().unwrap()[0].title, "Espresso");
    }

    #[test]
    fn test_inline_edit_invalid_stays_editing() {
        let (_tmp, storage, mut settings) = setup();
        seed(&storage, "Coffee", "2024-03-01", 500);
        let mut app = App::new(&storage, &mut settings);

        app.begin_edit();
        app.editor.draft_mut().unwrap().amount = "lots".into();
        app.save_edit();

        assert!(app.editor.is_editing());
        assert_eq!(storage.expenses.get_all().unwrap()[0].amount, Money::from_major(500));
    }

    #[test]
    fn test_delete_removes_row() {
        let (_tmp, storage, mut settings) = setup();
        seed(&storage, "Coffee", "2024-03-01", 500);
        let mut app = App::new(&storage, &mut settings);

        let id = app.list.selected_id().unwrap();
        app.request_delete();
        assert_eq!(app.active_dialog, ActiveDialog::ConfirmDelete(id));
        app.delete(id);

        assert!(app.list.expenses().is_empty());
        assert!(app.list.selected_id().is_none());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_cycle_month_wraps_through_all() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);

        app.cycle_month(false);
        assert_eq!(app.period().month, Some(12));
        app.cycle_month(true);
        assert_eq!(app.period().month, None);
        app.cycle_month(true);
        assert_eq!(app.period().month, Some(1));
    }

    #[test]
    fn test_cycle_year_uses_years_with_data() {
        let (_tmp, storage, mut settings) = setup();
        seed(&storage, "Old", "2023-03-10", 450);
        seed(&storage, "New", "2024-03-01", 500);
        let mut app = App::new(&storage, &mut settings);

        app.cycle_year(true);
        assert_eq!(app.period().year, Some(2023));
        app.cycle_year(true);
        assert_eq!(app.period().year, Some(2024));
        app.cycle_year(true);
        assert_eq!(app.period().year, None);
        app.cycle_year(false);
        assert_eq!(app.period().year, Some(2024));
    }

    #[test]
    fn test_goal_dialog_saves_settings() {
        let (_tmp, storage, mut settings) = setup();
        {
            let mut app = App::new(&storage, &mut settings);
            app.open_dialog(ActiveDialog::Goal);
            app.goal_input.set_value("2000");
            app.submit_goal();
            assert!(!app.has_dialog());
        }
        assert_eq!(settings.monthly_goal(), Some(Money::from_major(2000)));

        let reloaded = Settings::load_or_create(storage.paths()).unwrap();
        assert_eq!(reloaded.monthly_goal(), Some(Money::from_major(2000)));
    }

    #[test]
    fn test_goal_dialog_rejects_negative() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);

        app.open_dialog(ActiveDialog::Goal);
        app.goal_input.set_value("-5");
        app.submit_goal();

        assert_eq!(app.active_dialog, ActiveDialog::Goal);
        assert!(app.settings.monthly_goal().is_none());
    }

    #[test]
    fn test_amount_filter_applies_range() {
        let (_tmp, storage, mut settings) = setup();
        seed(&storage, "Coffee", "2024-03-01", 500);
        seed(&storage, "Lunch", "2024-03-20", 1800);
        let mut app = App::new(&storage, &mut settings);

        app.open_dialog(ActiveDialog::AmountFilter);
        app.range_form.min.set_value("1000");
        app.submit_amount_filter();

        let visible = app.list.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Lunch");
    }

    #[test]
    fn test_status_expires_after_ticks() {
        let (_tmp, storage, mut settings) = setup();
        let mut app = App::new(&storage, &mut settings);

        app.set_status("hello");
        for _ in 0..STATUS_TICKS {
            assert!(app.status_message.is_some());
            app.tick();
        }
        assert!(app.status_message.is_none());
    }
}
