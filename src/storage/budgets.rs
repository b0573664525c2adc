//! Budget repository for JSON storage
//!
//! Manages loading and saving per-category limits to budgets.json. There is
//! at most one budget per category, keyed by the exact category label.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FintrackError;
use crate::models::raw::coerce_amount;
use crate::models::{Budget, Money, RawAmount};

use super::file_io::{read_json, write_json_atomic};

const SCHEMA_VERSION: u32 = 1;

/// Serializable budget data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default)]
    schema_version: u32,
    #[serde(default)]
    budgets: Vec<Budget>,
}

/// Older files hold a bare list of `{category, amount}` entries in currency units
#[derive(Debug, Deserialize)]
struct LegacyBudget {
    category: String,
    #[serde(alias = "amount")]
    limit: RawAmount,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<String, Budget>>,
}

fn key(category: &str) -> String {
    category.trim().to_string()
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), FintrackError> {
        let document: Value = read_json(&self.path)?;

        let budgets = match document {
            Value::Null => Vec::new(),
            Value::Array(_) => {
                let legacy: Vec<LegacyBudget> = serde_json::from_value(document).map_err(|e| {
                    FintrackError::Storage(format!(
                        "Failed to parse {}: {}",
                        self.path.display(),
                        e
                    ))
                })?;
                legacy
                    .into_iter()
                    .map(|entry| {
                        let (limit, issue) = coerce_amount(&entry.limit);
                        if let Some(issue) = issue {
                            tracing::warn!(category = %entry.category, "budget limit: {}", issue);
                        }
                        Budget::new(entry.category.trim(), limit)
                    })
                    .collect()
            }
            _ => {
                let file_data: BudgetData = serde_json::from_value(document).map_err(|e| {
                    FintrackError::Storage(format!(
                        "Failed to parse {}: {}",
                        self.path.display(),
                        e
                    ))
                })?;
                file_data.budgets
            }
        };

        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for budget in budgets {
            data.insert(key(&budget.category), budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));

        let file_data = BudgetData {
            schema_version: SCHEMA_VERSION,
            budgets,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the budget for a category
    pub fn get(&self, category: &str) -> Result<Option<Budget>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&key(category)).cloned())
    }

    /// Get all budgets, sorted by category
    pub fn get_all(&self) -> Result<Vec<Budget>, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(budgets)
    }

    /// Set the limit for a category, creating the budget if needed
    pub fn upsert_limit(&self, category: &str, limit: Money) -> Result<Budget, FintrackError> {
        let mut data = self.data.write().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let budget = data
            .entry(key(category))
            .and_modify(|b| b.set_limit(limit))
            .or_insert_with(|| Budget::new(category.trim(), limit));

        Ok(budget.clone())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, FintrackError> {
        let data = self.data.read().map_err(|e| {
            FintrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
