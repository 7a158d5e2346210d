use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use expense_tracker::cli::{
    handle_expense_command, handle_goal_command, handle_import_command, handle_report_command,
    handle_serve_command, ExpenseCommands, GoalCommands, ImportArgs, ReportCommands, ServeArgs,
};
use expense_tracker::config::paths::DATA_DIR_ENV;
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::logging;
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Record expenses, filter them by month, year and amount, see where \
                  the money goes by category and month, and track spending against \
                  a monthly goal. Works as a CLI, a TUI, or a small JSON API."
)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding config.json and data/
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Import expenses from a CSV file
    Import(ImportArgs),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Monthly spending goal
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Serve the JSON API
    Serve(ServeArgs),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tui) => {
            expense_tracker::tui::run_tui(&storage, &mut settings)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import(args)) => {
            handle_import_command(&storage, &settings, args)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            handle_goal_command(&storage, &mut settings, cmd)?;
        }
        Some(Commands::Serve(args)) => {
            handle_serve_command(storage, &settings, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'expenses expense add <title> <amount> -c <category>' to record an expense.");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Expenses file:   {}", paths.expenses_file().display());
            println!("Initialized:     {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  User:          {}", settings.user_id);
            match settings.monthly_goal() {
                Some(goal) => println!("  Monthly goal:  {}", settings.format_money(goal)),
                None => println!("  Monthly goal:  (none)"),
            }
        }
        None => {
            println!("Expense Tracker - personal expenses from the terminal");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
