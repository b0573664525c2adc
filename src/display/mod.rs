//! Display formatting for terminal output
//!
//! Plain-text tables for transactions, budgets and report helpers.

pub mod budget;
pub mod report;
pub mod transaction;

pub use budget::format_budget_list;
pub use transaction::{
    format_month_listing, format_transaction_details, format_transaction_register, DisplayOptions,
};
