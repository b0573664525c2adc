//! Transaction model
//!
//! A single dated income or expense event. Amounts are stored unsigned; the
//! direction comes from the transaction type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use super::period::MonthPeriod;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[default]
    Expense,
    Income,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" | "exp" | "out" => Ok(Self::Expense),
            "income" | "inc" | "in" => Ok(Self::Income),
            other => Err(TransactionValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Expense or income
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Category label, e.g. "Food" or "Salary"
    pub category: String,

    /// Unsigned amount
    pub amount: Money,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Transaction date
    pub date: NaiveDate,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction with an empty description
    pub fn new(
        kind: TransactionType,
        category: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            kind,
            category: category.into(),
            amount,
            description: String::new(),
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an expense
    pub fn expense(category: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(TransactionType::Expense, category, amount, date)
    }

    /// Create an income
    pub fn income(category: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(TransactionType::Income, category, amount, date)
    }

    /// Builder-style description setter
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    /// Listing order: latest date first, then most recently created
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then(other.created_at.cmp(&self.created_at))
    }

    /// Amount with sign applied: negative for expenses
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Expense => -self.amount,
            TransactionType::Income => self.amount,
        }
    }

    /// Replace every user-editable field, keeping id and creation time
    pub fn replace_with(&mut self, other: Transaction) {
        self.kind = other.kind;
        self.category = other.category;
        self.amount = other.amount;
        self.description = other.description;
        self.date = other.date;
        self.updated_at = Utc::now();
    }

    /// Validate the fields the add/edit flow requires
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.is_within_entry_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

/// The `limit` newest transactions dated in `period`
pub fn recent_in_month(
    transactions: &[Transaction],
    period: MonthPeriod,
    limit: usize,
) -> Vec<Transaction> {
    let mut recent: Vec<Transaction> = transactions
        .iter()
        .filter(|t| period.contains(t.date))
        .cloned()
        .collect();
    recent.sort_by(Transaction::cmp_newest_first);
    recent.truncate(limit);
    recent
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "+" };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.category,
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    MissingCategory,
    /// Nothing was entered in the amount field
    MissingAmount,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    UnknownType(String),
    UnknownCategory {
        kind: TransactionType,
        category: String,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Please select a category"),
            Self::MissingAmount => write!(f, "Amount is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than 0 (got {})", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the maximum of {}",
                amount,
                Money::MAX_ENTRY
            ),
            Self::UnknownType(t) => {
                write!(f, "Unknown transaction type '{}'; use expense or income", t)
            }
            Self::UnknownCategory { kind, category } => write!(
                f,
                "'{}' is not a known {} category",
                category,
                kind.as_str()
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
