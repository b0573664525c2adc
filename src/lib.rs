//! Fintrack - Terminal-based personal finance tracker
//!
//! This library provides the core functionality for the Fintrack command line
//! application: recording income and expense transactions by category,
//! totalling them per calendar month, breaking spending down by category,
//! following the month-by-month trend of a year and tracking spending against
//! monthly category limits.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, months, transactions, budgets)
//! - `storage`: JSON file storage layer
//! - `services`: Validation and mutation of stored data, CSV import
//! - `reports`: Pure aggregation over a transaction collection
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::reports::period_totals;
//!
//! let totals = period_totals(&transactions, selected_date);
//! println!("{}", totals.balance);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
