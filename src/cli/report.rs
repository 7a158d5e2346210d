//! Report CLI commands
//!
//! Dashboard, category, monthly and daily summaries.

use chrono::Local;
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::report::{format_daily_overview, format_dashboard, format_group_rows};
use crate::error::ExpenseResult;
use crate::reports::{ranked_categories, top_categories, totals_by_month, PeriodFilter};
use crate::services::ExpenseService;
use crate::storage::Storage;
use crate::views::{Dashboard, DailyOverview};

/// Month/year selection shared by listing and report commands
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Month (1-12 or a name like "march"), or "all"
    #[arg(short, long, default_value = "all")]
    pub month: String,
    /// Year, or "all"
    #[arg(short, long, default_value = "all")]
    pub year: String,
}

impl PeriodArgs {
    pub fn filter(&self) -> ExpenseResult<PeriodFilter> {
        PeriodFilter::parse(&self.month, &self.year)
    }
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, goal progress, categories and months
    Dashboard {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Spending by category, largest first
    Categories {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only show the largest N categories
        #[arg(long)]
        top: Option<usize>,
    },
    /// Spending per month, oldest first
    Monthly {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Spending per day, newest first, with the daily average
    Daily {
        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let expenses = ExpenseService::new(storage).list()?;
    let currency = &settings.currency;

    match cmd {
        ReportCommands::Dashboard { period } => {
            let dashboard = Dashboard::build(
                &expenses,
                period.filter()?,
                settings.monthly_goal(),
                Local::now().date_naive(),
            );
            print!("{}", format_dashboard(&dashboard, currency));
        }
        ReportCommands::Categories { period, top } => {
            let filtered = period.filter()?.apply(&expenses);
            let totals = match top {
                Some(n) => top_categories(&filtered, n),
                None => ranked_categories(&filtered),
            };
            println!("Spending by Category");
            print!("{}", format_group_rows(&totals, currency));
        }
        ReportCommands::Monthly { period } => {
            let filtered = period.filter()?.apply(&expenses);
            println!("Spending by Month");
            print!("{}", format_group_rows(&totals_by_month(&filtered), currency));
        }
        ReportCommands::Daily { period } => {
            let filtered = period.filter()?.apply(&expenses);
            print!(
                "{}",
                format_daily_overview(&DailyOverview::build(&filtered), currency)
            );
        }
    }

    Ok(())
}
