//! Storage initialization
//!
//! Handles first-run setup: directories, the settings file and empty data
//! files.

use crate::config::paths::FintrackPaths;
use crate::config::settings::Settings;
use crate::error::FintrackError;

use super::budgets::BudgetRepository;
use super::transactions::TransactionRepository;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone, so running this twice is harmless.
pub fn initialize_storage(paths: &FintrackPaths) -> Result<(), FintrackError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.transactions_file().exists() {
        TransactionRepository::new(paths.transactions_file()).save()?;
    }

    if !paths.budgets_file().exists() {
        BudgetRepository::new(paths.budgets_file()).save()?;
    }

    tracing::info!(base_dir = %paths.base_dir().display(), "storage initialized");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FintrackPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths).unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.settings_file().exists());
        assert!(paths.transactions_file().exists());
        assert!(paths.budgets_file().exists());
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        let budgets = BudgetRepository::new(paths.budgets_file());
        budgets.load().unwrap();
        budgets.upsert_limit("Food", Money::from_units(200)).unwrap();
        budgets.save().unwrap();

        initialize_storage(&paths).unwrap();

        let reloaded = BudgetRepository::new(paths.budgets_file());
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
    }
}
