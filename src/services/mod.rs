//! Service layer for Fintrack
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, category resolution and persistence of each change.

pub mod budget;
pub mod import;
pub mod transaction;

pub use budget::BudgetService;
pub use import::{ImportResult, ImportService, ImportWarning};
pub use transaction::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
