//! Budget limit model
//!
//! A monthly spending ceiling for one expense category. There is at most one
//! budget per category; setting a new limit overwrites the old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// A per-category monthly spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Expense category this limit applies to
    pub category: String,

    /// Monthly ceiling. Zero means the category is not tracked.
    pub limit: Money,

    /// When this budget was first set
    pub created_at: DateTime<Utc>,

    /// When the limit was last changed
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(category: impl Into<String>, limit: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            category: category.into(),
            limit,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the limit
    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    /// Whether a limit is in effect
    pub fn is_tracked(&self) -> bool {
        self.limit.is_positive()
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }

        if self.limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }

        if !self.limit.is_within_entry_limit() {
            return Err(BudgetValidationError::LimitTooLarge);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingCategory,
    NegativeLimit,
    LimitTooLarge,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Budget category is required"),
            Self::NegativeLimit => write!(f, "Budget limit cannot be negative"),
            Self::LimitTooLarge => {
                write!(f, "Budget limit cannot exceed {}", Money::MAX_ENTRY)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
