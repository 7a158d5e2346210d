//! CSV Import service
//!
//! Imports expenses from comma-separated text with a header row and the
//! columns `date, title, amount, category`. Rows with a missing or empty field
//! are skipped; the first row whose date or amount cannot be parsed stops the
//! import. Rows read before that point are still stored.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Category, Expense, Money, NewExpense};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Number of columns an import row must provide
const COLUMNS: usize = 4;

/// Result of an import run
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Rows parsed successfully, in file order
    pub parsed: Vec<NewExpense>,
    /// Expenses created (empty on a dry run)
    pub created: Vec<Expense>,
    /// Rows skipped because a field was missing or empty
    pub skipped: usize,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl ImportResult {
    pub fn imported(&self) -> usize {
        self.created.len()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    user_id: String,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            user_id: "default".to_string(),
        }
    }

    /// Owner recorded on imported expenses
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Import from a file on disk
    pub fn import_file(&self, path: &Path, dry_run: bool) -> ExpenseResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            ExpenseError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;
        self.import_reader(file, dry_run)
    }

    /// Import from CSV text
    pub fn import_str(&self, contents: &str, dry_run: bool) -> ExpenseResult<ImportResult> {
        self.import_reader(contents.as_bytes(), dry_run)
    }

    /// Import from any reader
    ///
    /// Well-formed rows are collected and stored with a single write. When a
    /// row stops the import, the rows before it are stored first.
    pub fn import_reader<R: Read>(&self, reader: R, dry_run: bool) -> ExpenseResult<ImportResult> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut result = ImportResult {
            dry_run,
            ..ImportResult::default()
        };
        let mut failure = None;

        for record in csv_reader.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    failure = Some(e.to_string());
                    break;
                }
            };
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let parsed = parse_record(&record).and_then(|row| {
                row.map(|new| new.validate().map_err(|e| e.to_string()))
                    .transpose()
            });
            match parsed {
                Ok(Some(new)) => result.parsed.push(new),
                Ok(None) => {
                    log::debug!("Skipping incomplete row on line {}", line);
                    result.skipped += 1;
                }
                Err(reason) => {
                    failure = Some(format!("line {}: {}", line, reason));
                    break;
                }
            }
        }

        if !dry_run && !result.parsed.is_empty() {
            let service = ExpenseService::new(self.storage).with_user_id(self.user_id.clone());
            result.created = service
                .create_many(result.parsed.clone())
                .map_err(|e| abort(&result, e.to_string()))?;
        }

        if let Some(reason) = failure {
            return Err(abort(&result, reason));
        }

        log::info!(
            "Import finished: {} parsed, {} created, {} skipped",
            result.parsed.len(),
            result.created.len(),
            result.skipped
        );
        Ok(result)
    }
}

/// Build the single error reported when an import stops early
fn abort(result: &ImportResult, reason: String) -> ExpenseError {
    let err = if result.created.is_empty() {
        ExpenseError::Import(reason)
    } else {
        ExpenseError::Import(format!(
            "{} ({} expenses were imported before the failure)",
            reason,
            result.created.len()
        ))
    };
    log::error!("Error importing expenses: {}", err);
    err
}

/// Parse one row; `Ok(None)` means the row is incomplete and should be skipped
fn parse_record(record: &StringRecord) -> Result<Option<NewExpense>, String> {
    let fields: Vec<&str> = record.iter().take(COLUMNS).collect();
    if fields.len() < COLUMNS || fields.iter().any(|f| f.is_empty()) {
        return Ok(None);
    }
    let (date, title, amount, category) = (fields[0], fields[1], fields[2], fields[3]);

    let date = parse_date(date).ok_or_else(|| format!("Could not parse date: '{}'", date))?;
    let amount = Money::parse(amount).map_err(|e| e.to_string())?;
    let category = match Category::from_label(category) {
        Some(category) => category,
        None => return Ok(None),
    };

    Ok(Some(NewExpense::new(title, amount, date, category)))
}
