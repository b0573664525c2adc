//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json.
//!
//! Two on-disk layouts are understood:
//!
//! - the current document, `{"schema_version": 1, "transactions": [...], "quarantined": [...]}`,
//!   with amounts in cents
//! - a bare array of loosely-typed records written by older tools, with
//!   amounts in currency units as numbers or strings
//!
//! Records that cannot be dated are quarantined: they stay in the file
//! untouched but never reach the working set.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FintrackError;
use crate::models::{MonthPeriod, RawTransaction, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

const SCHEMA_VERSION: u32 = 1;

/// Document layout as read from disk
#[derive(Debug, Default, Deserialize)]
struct StoredTransactions {
    #[serde(default)]
    transactions: Vec<Value>,
    #[serde(default)]
    quarantined: Vec<Value>,
}

/// Document layout as written to disk
#[derive(Debug, Serialize)]
struct TransactionData<'a> {
    schema_version: u32,
    transactions: Vec<Transaction>,
    quarantined: &'a [Value],
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    quarantined: RwLock<Vec<Value>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            quarantined: RwLock::new(Vec::new()),
        }
    }

    /// Load transactions from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let document: Value = read_json(&self.path)?;

        let mut loaded = Vec::new();
        let mut quarantine = Vec::new();

        match document {
            Value::Null => {}
            Value::Array(records) => {
                tracing::info!(
                    path = %self.path.display(),
                    records = records.len(),
                    "reading legacy transaction list"
                );
                for (index, record) in records.into_iter().enumerate() {
                    match decode_legacy(index, &record) {
                        Some(txn) => loaded.push(txn),
                        None => quarantine.push(record),
                    }
                }
            }
            Value::Object(_) => {
                let stored: StoredTransactions = serde_json::from_value(document).map_err(|e| {
                    FintrackError::Storage(format!(
                        "Failed to parse {}: {}",
                        self.path.display(),
                        e
                    ))
                })?;
                quarantine = stored.quarantined;
                for (index, record) in stored.transactions.into_iter().enumerate() {
                    match serde_json::from_value::<Transaction>(record.clone()) {
                        Ok(txn) => loaded.push(txn),
                        Err(e) => {
                            tracing::warn!(index, error = %e, "quarantining unreadable transaction");
                            quarantine.push(record);
                        }
                    }
                }
            }
            other => {
                return Err(FintrackError::Storage(format!(
                    "Failed to parse {}: expected an object or array, found {}",
                    self.path.display(),
                    json_kind(&other)
                )))
            }
        }

        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut quarantined = self.quarantined.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for txn in loaded {
            data.insert(txn.id, txn);
        }
        *quarantined = quarantine;

        tracing::debug!(
            transactions = data.len(),
            quarantined = quarantined.len(),
            "loaded transactions"
        );
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let quarantined = self.quarantined.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);

        let file_data = TransactionData {
            schema_version: SCHEMA_VERSION,
            transactions,
            quarantined: &quarantined,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get transactions in an inclusive date range, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, FintrackError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Get transactions dated within a calendar month, newest first
    pub fn get_by_month(&self, period: MonthPeriod) -> Result<Vec<Transaction>, FintrackError> {
        self.get_by_date_range(period.first_day(), period.last_day())
    }

    /// Resolve a user-supplied identifier: full UUID, `txn-` short form or hex prefix
    pub fn find_by_prefix(&self, fragment: &str) -> Result<Transaction, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        if let Ok(id) = fragment.trim().parse::<TransactionId>() {
            if let Some(txn) = data.get(&id) {
                return Ok(txn.clone());
            }
        }

        let matches: Vec<_> = data
            .values()
            .filter(|t| t.id.matches_prefix(fragment))
            .collect();

        match matches.as_slice() {
            [] => Err(FintrackError::transaction_not_found(fragment)),
            [only] => Ok((*only).clone()),
            many => Err(FintrackError::Ambiguous {
                entity_type: "Transaction",
                identifier: fragment.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> Result<bool, FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Count transactions in the working set
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    /// Count records held back because they could not be read
    pub fn quarantined_count(&self) -> Result<usize, FintrackError> {
        let quarantined = self.quarantined.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(quarantined.len())
    }
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(Transaction::cmp_newest_first);
}

fn decode_legacy(index: usize, record: &Value) -> Option<Transaction> {
    let raw: RawTransaction = match serde_json::from_value(record.clone()) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(index, error = %e, "quarantining malformed transaction record");
            return None;
        }
    };

    match raw.normalize() {
        Ok((txn, issues)) => {
            for issue in issues {
                tracing::warn!(index, id = %txn.id, "{}", issue);
            }
            Some(txn)
        }
        Err(issue) => {
            tracing::warn!(index, "quarantining transaction: {}", issue);
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
