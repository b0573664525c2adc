//! User settings for Fintrack
//!
//! Display preferences and the category lists. Every field has a serde
//! default so older or hand-edited config files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FintrackError;
use crate::models::{CategoryCatalog, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for Fintrack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many transactions the month listing shows by default
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Expense categories, in budget report order
    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,

    /// Income categories
    #[serde(default = "default_income_categories")]
    pub income_categories: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_limit() -> usize {
    8
}

fn default_expense_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_income_categories() -> Vec<String> {
    DEFAULT_INCOME_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_limit: default_recent_limit(),
            expense_categories: default_expense_categories(),
            income_categories: default_income_categories(),
        }
    }
}

impl Settings {
    /// The category lists as a lookup catalog
    pub fn catalog(&self) -> CategoryCatalog {
        CategoryCatalog::new(
            self.expense_categories.clone(),
            self.income_categories.clone(),
        )
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        // Don't save defaults here - `init` decides when to persist
        let settings: Settings = read_json(&settings_path).map_err(|e| match e {
            FintrackError::Json(msg) => {
                FintrackError::Config(format!("Failed to parse settings file {}", msg))
            }
            other => other,
        })?;

        tracing::debug!(path = %settings_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.recent_limit, 8);
        assert_eq!(settings.expense_categories.len(), 8);
        assert_eq!(settings.income_categories.len(), 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.recent_limit = 20;
        settings.currency_symbol = "€".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"recent_limit": 3}"#).unwrap();
        assert_eq!(settings.recent_limit, 3);
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.catalog(), CategoryCatalog::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FintrackError::Config(_)));
        assert!(err.to_string().contains("config.json"));
    }
}
