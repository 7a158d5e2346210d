//! Expense CLI commands
//!
//! Implements CLI commands for expense management.

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::reports::{AmountRange, ExpenseQuery, SortKey, SortOrder};
use crate::services::ExpenseService;
use crate::storage::Storage;
use crate::views::{ExpenseDraft, RowEditor};

use super::report::PeriodArgs;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        title: String,
        /// Amount (e.g. "500" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (Food, Transportation, Housing, Utilities, Entertainment,
        /// Healthcare, Shopping, Education, Travel, Other)
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List expenses
    List {
        #[command(flatten)]
        period: PeriodArgs,
        /// Minimum amount (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        min: Option<String>,
        /// Maximum amount (inclusive)
        #[arg(long, allow_hyphen_values = true)]
        max: Option<String>,
        /// Sort by "date" or "amount"
        #[arg(short, long, default_value = "date")]
        sort: SortKey,
        /// Sort order, "asc" or "desc"
        #[arg(short, long, default_value = "desc")]
        order: SortOrder,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show expense details
    Show {
        /// Expense ID (e.g. exp-1a2b3c4d or a full UUID)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        id: String,
    },
}

fn parse_bound(value: Option<String>, name: &str) -> ExpenseResult<Option<Money>> {
    value
        .map(|v| {
            Money::parse(&v).map_err(|e| {
                ExpenseError::Validation(format!("Invalid {} amount '{}': {}", name, v, e))
            })
        })
        .transpose()
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage).with_user_id(settings.user_id.clone());
    let currency = &settings.currency;

    match cmd {
        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
        } => {
            let mut draft = ExpenseDraft::new(Local::now().date_naive());
            draft.title = title;
            draft.amount = amount;
            draft.category = category;
            if let Some(date) = date {
                draft.date = date;
            }

            let expense = service.create(draft.validate()?)?;
            println!(
                "Added expense {}: {} {} on {} ({})",
                expense.id,
                expense.title,
                currency.format(expense.amount),
                expense.date,
                expense.category
            );
        }

        ExpenseCommands::List {
            period,
            min,
            max,
            sort,
            order,
            limit,
            json,
        } => {
            let query = ExpenseQuery {
                period: period.filter()?,
                amount: AmountRange::new(parse_bound(min, "minimum")?, parse_bound(max, "maximum")?),
                sort: Some((sort, order)),
            };
            let mut expenses = query.apply(&service.list()?);
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&expenses)?);
            } else {
                print!("{}", format_expense_table(&expenses, currency));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = service.find_required(&id)?;
            print!("{}", format_expense_details(&expense, currency));
        }

        ExpenseCommands::Edit {
            id,
            title,
            amount,
            category,
            date,
        } => {
            if title.is_none() && amount.is_none() && category.is_none() && date.is_none() {
                println!("Nothing to change. Pass --title, --amount, --category or --date.");
                return Ok(());
            }

            let expense = service.find_required(&id)?;
            let mut editor = RowEditor::default();
            editor.begin_edit(&expense);
            if let Some(draft) = editor.draft_mut() {
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(amount) = amount {
                    draft.amount = amount;
                }
                if let Some(category) = category {
                    draft.category = category;
                }
                if let Some(date) = date {
                    draft.date = date;
                }
            }

            let (id, new) = editor.save()?;
            let updated = service.update(id, new)?;
            println!("Updated expense {}", updated.id);
            print!("{}", format_expense_details(&updated, currency));
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.find_required(&id)?;
            let deleted = service.delete(expense.id)?;
            println!("Deleted expense {} ({})", deleted.id, deleted.title);
        }
    }

    Ok(())
}
