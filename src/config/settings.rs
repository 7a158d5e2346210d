//! User settings for the expense tracker
//!
//! Holds the monthly spending goal, the user id stamped on new expenses, and
//! how amounts are displayed.

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CurrencyFormat, Money};
use crate::storage::file_io::write_json_atomic;

/// User settings for the expense tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Owner recorded on every new expense
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Monthly spending goal; absent or zero means no goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monthly_goal: Option<Money>,

    /// How amounts are rendered
    #[serde(default)]
    pub currency: CurrencyFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_user_id() -> String {
    "default".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            user_id: default_user_id(),
            monthly_goal: None,
            currency: CurrencyFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> ExpenseResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> ExpenseResult<()> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The monthly goal, if one is set and non-zero
    pub fn monthly_goal(&self) -> Option<Money> {
        self.monthly_goal.filter(|goal| goal.is_positive())
    }

    /// Set the monthly goal; negative goals are rejected
    pub fn set_monthly_goal(&mut self, goal: Money) -> ExpenseResult<()> {
        if goal.is_negative() {
            return Err(ExpenseError::Validation(
                "Monthly goal cannot be negative".into(),
            ));
        }
        self.monthly_goal = if goal.is_zero() { None } else { Some(goal) };
        Ok(())
    }

    pub fn clear_monthly_goal(&mut self) {
        self.monthly_goal = None;
    }

    /// Format an amount with the configured currency style
    pub fn format_money(&self, amount: Money) -> String {
        self.currency.format(amount)
    }
}
