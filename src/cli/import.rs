//! CSV import CLI command

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::services::ImportService;
use crate::storage::Storage;

/// Arguments for `expenses import`
#[derive(Args)]
pub struct ImportArgs {
    /// CSV file with a header row and columns: date, title, amount, category
    pub file: PathBuf,
    /// Parse and report without creating anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    settings: &Settings,
    args: ImportArgs,
) -> ExpenseResult<()> {
    let service = ImportService::new(storage).with_user_id(settings.user_id.clone());
    let result = service.import_file(&args.file, args.dry_run)?;

    if result.dry_run {
        println!("Dry run: {} expense(s) would be imported", result.parsed.len());
        for new in &result.parsed {
            println!(
                "  {}  {:<30} {:>12}  {}",
                new.date,
                new.title,
                settings.currency.format(new.amount),
                new.category
            );
        }
    } else {
        println!("Imported {} expense(s)", result.imported());
    }

    if result.skipped > 0 {
        println!("Skipped {} incomplete row(s)", result.skipped);
    }

    Ok(())
}
