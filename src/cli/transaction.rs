//! Transaction CLI commands
//!
//! Implements the add/edit/delete/show/list commands.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::transaction::{
    format_month_listing, format_transaction_details, format_transaction_register, DisplayOptions,
};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{TransactionType, TransactionValidationError};
use crate::services::{CreateTransactionInput, TransactionService, UpdateTransactionInput};
use crate::storage::Storage;

use super::{parse_amount, parse_day, parse_month};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record an expense or an income
    Add {
        /// Transaction type: expense or income
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Category (e.g., Food, Salary)
        category: String,
        /// Amount (e.g., "250" or "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (full UUID or txn-xxxxxxxx)
        id: String,
        /// New type: expense or income
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Delete a transaction
    #[command(alias = "rm")]
    Delete {
        /// Transaction ID (full UUID or txn-xxxxxxxx)
        id: String,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (full UUID or txn-xxxxxxxx)
        id: String,
    },
    /// List the most recent transactions of a month
    #[command(alias = "ls")]
    List {
        /// Month to list (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// Number of transactions to show (defaults to the configured limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// List every transaction regardless of month
        #[arg(long)]
        all: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: TransactionCommands,
) -> FintrackResult<()> {
    let catalog = settings.catalog();
    let service = TransactionService::new(storage, &catalog);
    let options = DisplayOptions::from(settings);

    match cmd {
        TransactionCommands::Add {
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let input = CreateTransactionInput {
                kind: parse_kind(&kind)?,
                category,
                amount: parse_amount(&amount)?,
                date: parse_day(date.as_deref(), today)?,
                description,
            };

            let txn = service.create(input)?;
            println!("Added {} {}", txn.kind.as_str(), txn.id);
            print!("{}", format_transaction_details(&txn, &options));
        }

        TransactionCommands::Edit {
            id,
            kind,
            category,
            amount,
            date,
            description,
        } => {
            let existing = service.find(&id)?;

            let input = UpdateTransactionInput {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date
                    .as_deref()
                    .map(|d| parse_day(Some(d), today))
                    .transpose()?,
                description,
            };

            if input.is_empty() {
                println!("Nothing to change. See `fintrack edit --help` for the options.");
                return Ok(());
            }

            let txn = service.update(existing.id, input)?;
            println!("Updated {}", txn.id);
            print!("{}", format_transaction_details(&txn, &options));
        }

        TransactionCommands::Delete { id } => {
            let existing = service.find(&id)?;
            let txn = service.delete(existing.id)?;
            println!(
                "Deleted {} ({} {} on {})",
                txn.id,
                txn.category,
                txn.amount.format_with_symbol(&options.currency),
                txn.date.format(&options.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service.find(&id)?;
            print!("{}", format_transaction_details(&txn, &options));
        }

        TransactionCommands::List { month, limit, all } => {
            if all {
                let mut transactions = service.list_all()?;
                if let Some(limit) = limit {
                    transactions.truncate(limit);
                }
                if transactions.is_empty() {
                    println!("No transactions yet. Add one with `fintrack add`.");
                } else {
                    print!("{}", format_transaction_register(&transactions, &options));
                }
                return Ok(());
            }

            let period = parse_month(month.as_deref(), today)?;
            let limit = limit.unwrap_or(settings.recent_limit);
            let transactions = service.recent_for_month(period, limit)?;
            let stored = service.count()?;

            print!(
                "{}",
                format_month_listing(&transactions, period, stored, &options)
            );

            let in_month = service.list_for_month(period)?.len();
            if in_month > transactions.len() {
                println!(
                    "Showing {} of {} transactions. Use --limit to see more.",
                    transactions.len(),
                    in_month
                );
            }
        }
    }

    Ok(())
}

fn parse_kind(kind: &str) -> FintrackResult<TransactionType> {
    kind.parse()
        .map_err(|e: TransactionValidationError| FintrackError::Validation(e.to_string()))
}
