//! Monthly goal CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::report::format_goal;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Money;
use crate::reports::{current_month_total, GoalProgress};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Set the monthly spending goal
    Set {
        /// Goal amount (0 removes the goal)
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Remove the monthly spending goal
    Clear,
    /// Show progress towards the goal this month
    Show,
}

/// Handle a goal command
pub fn handle_goal_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: GoalCommands,
) -> ExpenseResult<()> {
    match cmd {
        GoalCommands::Set { amount } => {
            let goal = Money::parse(&amount).map_err(|e| {
                ExpenseError::Validation(format!("Invalid goal '{}': {}", amount, e))
            })?;
            settings.set_monthly_goal(goal)?;
            settings.save(storage.paths())?;

            match settings.monthly_goal() {
                Some(goal) => println!(
                    "Monthly goal set to {}",
                    settings.currency.format(goal)
                ),
                None => println!("Monthly goal removed"),
            }
        }
        GoalCommands::Clear => {
            settings.clear_monthly_goal();
            settings.save(storage.paths())?;
            println!("Monthly goal removed");
        }
        GoalCommands::Show => {
            let expenses = ExpenseService::new(storage).list()?;
            let current = current_month_total(&expenses, Local::now().date_naive());
            let progress = GoalProgress::compute(current, settings.monthly_goal());
            print!("{}", format_goal(&progress, &settings.currency));
        }
    }

    Ok(())
}
