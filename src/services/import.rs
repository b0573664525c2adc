//! CSV Import service
//!
//! Reads transactions exported as CSV with the columns
//! `type,category,amount,description,date` (an `id` column is optional).
//! Rows go through the same lenient normalization as legacy data files:
//! an unreadable amount imports as zero, an unreadable date or type skips
//! the row. Every problem is reported back as a row-level warning.

use std::io::Read;

use serde::Deserialize;

use crate::error::{FintrackError, FintrackResult};
use crate::models::{CategoryCatalog, RawAmount, RawTransaction};
use crate::storage::Storage;

const REQUIRED_COLUMNS: [&str; 3] = ["type", "amount", "date"];

/// One CSV row, every field as text
#[derive(Debug, Default, Deserialize)]
struct CsvRow {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    date: String,
}

impl From<CsvRow> for RawTransaction {
    fn from(row: CsvRow) -> Self {
        RawTransaction {
            id: row.id,
            kind: row.kind,
            category: row.category,
            amount: RawAmount::Text(row.amount),
            description: row.description,
            date: row.date,
            created_at: None,
            updated_at: None,
        }
    }
}

/// A problem found on one line of the input
#[derive(Debug, Clone, PartialEq)]
pub struct ImportWarning {
    /// Line number in the file (the header is line 1)
    pub line: usize,
    pub message: String,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of transactions imported
    pub imported: usize,
    /// Number of rows left out
    pub skipped: usize,
    /// Data-quality warnings by line
    pub warnings: Vec<ImportWarning>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
    catalog: &'a CategoryCatalog,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage, catalog: &'a CategoryCatalog) -> Self {
        Self { storage, catalog }
    }

    /// Import every row of a CSV document and save once at the end
    pub fn import_csv<R: Read>(&self, input: R) -> FintrackResult<ImportResult> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();
        let missing: Vec<_> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == **col))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(FintrackError::Import(format!(
                "Missing required column(s): {}",
                missing.join(", ")
            )));
        }

        let mut result = ImportResult::default();

        for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
            let line = index + 2;

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    result.skip(line, format!("unreadable row: {}", e));
                    continue;
                }
            };

            let (mut txn, issues) = match RawTransaction::from(row).normalize() {
                Ok(normalized) => normalized,
                Err(issue) => {
                    result.skip(line, issue.to_string());
                    continue;
                }
            };

            for issue in issues {
                result.warn(line, issue.to_string());
            }

            if self.storage.transactions.get(txn.id)?.is_some() {
                result.skip(line, format!("{} is already present", txn.id));
                continue;
            }

            if let Some(canonical) = self.catalog.find(txn.kind, &txn.category) {
                txn.category = canonical.to_string();
            }

            self.storage.transactions.upsert(txn)?;
            result.imported += 1;
        }

        if result.imported > 0 {
            self.storage.transactions.save()?;
        }

        tracing::info!(
            imported = result.imported,
            skipped = result.skipped,
            warnings = result.warnings.len(),
            "csv import finished"
        );
        Ok(result)
    }
}

impl ImportResult {
    fn warn(&mut self, line: usize, message: String) {
        tracing::warn!(line, "{}", message);
        self.warnings.push(ImportWarning { line, message });
    }

    fn skip(&mut self, line: usize, message: String) {
        self.skipped += 1;
        self.warn(line, message);
    }
}
