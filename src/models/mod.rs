//! Core data models for Fintrack
//!
//! Transactions and budgets are the only persisted records; money, ids,
//! month periods and the category catalog are value types around them.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod raw;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use category::{CategoryCatalog, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use period::{MonthPeriod, PeriodParseError};
pub use raw::{DataIssue, RawAmount, RawTransaction};
pub use transaction::{recent_in_month, Transaction, TransactionType, TransactionValidationError};
