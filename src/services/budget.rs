//! Budget service
//!
//! Setting and reading per-category monthly limits.

use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, CategoryCatalog, Money, TransactionType};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
    catalog: &'a CategoryCatalog,
}

/// Read a limit the way the entry form does: anything unreadable counts as zero.
pub fn parse_limit(raw: &str) -> Money {
    match Money::parse(raw) {
        Ok(limit) => limit,
        Err(e) => {
            tracing::warn!("{}; treating limit as 0", e);
            Money::zero()
        }
    }
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage, catalog: &'a CategoryCatalog) -> Self {
        Self { storage, catalog }
    }

    /// Set the monthly limit for an expense category
    ///
    /// A limit of zero stops tracking the category without removing it.
    pub fn set_limit(&self, category: &str, raw_limit: &str) -> FintrackResult<Budget> {
        let category = self
            .catalog
            .find(TransactionType::Expense, category)
            .ok_or_else(|| FintrackError::category_not_found(category.trim()))?
            .to_string();

        let limit = parse_limit(raw_limit);
        if limit.is_negative() {
            return Err(FintrackError::Validation(format!(
                "Budget limit cannot be negative (got {})",
                limit
            )));
        }

        if !limit.is_within_entry_limit() {
            return Err(FintrackError::Validation(format!(
                "Budget limit cannot exceed {}",
                Money::MAX_ENTRY
            )));
        }

        let budget = self.storage.budgets.upsert_limit(&category, limit)?;
        budget
            .validate()
            .map_err(|e| FintrackError::Validation(e.to_string()))?;
        self.storage.budgets.save()?;

        tracing::info!(category = %budget.category, limit = %budget.limit, "budget limit set");
        Ok(budget)
    }

    /// Get the budget for a category, if one has been set
    pub fn get(&self, category: &str) -> FintrackResult<Option<Budget>> {
        let canonical = self
            .catalog
            .find(TransactionType::Expense, category)
            .unwrap_or(category);
        self.storage.budgets.get(canonical)
    }

    /// All budgets, sorted by category
    pub fn list(&self) -> FintrackResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }
}
