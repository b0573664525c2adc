//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.
//! "Today" is passed in by the caller so handlers never read the clock.

pub mod budget;
pub mod import;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use import::handle_import_command;
pub use report::{handle_dashboard_command, handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{FintrackError, FintrackResult};
use crate::models::raw::parse_date;
use crate::models::{Money, MonthPeriod, TransactionValidationError};

/// Parse `YYYY-MM`, defaulting to the month containing `today`
pub(crate) fn parse_month(month: Option<&str>, today: NaiveDate) -> FintrackResult<MonthPeriod> {
    match month {
        Some(s) => MonthPeriod::parse(s).map_err(|e| {
            FintrackError::Validation(format!("{}. Use YYYY-MM (e.g., 2025-01)", e))
        }),
        None => Ok(MonthPeriod::current(today)),
    }
}

/// Parse `YYYY-MM-DD`, defaulting to `today`
pub(crate) fn parse_day(date: Option<&str>, today: NaiveDate) -> FintrackResult<NaiveDate> {
    match date {
        Some(s) => parse_date(s).ok_or_else(|| {
            FintrackError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(today),
    }
}

/// Parse a user-entered amount
pub(crate) fn parse_amount(amount: &str) -> FintrackResult<Money> {
    if amount.trim().is_empty() {
        return Err(FintrackError::Validation(
            TransactionValidationError::MissingAmount.to_string(),
        ));
    }
    Money::parse(amount).map_err(|e| FintrackError::Validation(e.to_string()))
}

/// Open a CSV export target
pub(crate) fn create_export_file(path: &Path) -> FintrackResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        FintrackError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
