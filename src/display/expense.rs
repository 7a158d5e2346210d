//! Expense display formatting
//!
//! Tables for lists and a detail block for single expenses.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{CurrencyFormat, Expense, Money};

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of expenses as a table, followed by the count and total
pub fn format_expense_table(expenses: &[Expense], currency: &CurrencyFormat) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format("%Y-%m-%d").to_string(),
        title: truncate(&e.title, 32),
        category: e.category.to_string(),
        amount: currency.format(e.amount),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    format!(
        "{}\n\n{} expense(s), total {}\n",
        table,
        expenses.len(),
        currency.format(total)
    )
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, currency: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("UUID:        {}\n", expense.id.as_uuid()));
    output.push_str(&format!("Title:       {}\n", expense.title));
    output.push_str(&format!("Amount:      {}\n", currency.format(expense.amount)));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("User:        {}\n", expense.user_id));
    if let Some(created) = expense.created_at {
        output.push_str(&format!(
            "Created:     {}\n",
            created.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }

    output
}
