//! Transaction display formatting
//!
//! Register rows, detail views and the month listing with its empty states.

use crate::models::{MonthPeriod, Transaction};

use super::report::truncate;

/// How dates and amounts are rendered
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub currency: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency: "$".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl From<&crate::config::Settings> for DisplayOptions {
    fn from(settings: &crate::config::Settings) -> Self {
        Self {
            currency: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }
}

/// Signed amount: "-" for expenses, "+" for income
pub fn format_signed_amount(txn: &Transaction, currency: &str) -> String {
    let sign = if txn.is_expense() { "-" } else { "+" };
    format!("{}{}", sign, txn.amount.format_with_symbol(currency))
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, options: &DisplayOptions) -> String {
    let description = if txn.description.is_empty() {
        "-".to_string()
    } else {
        truncate(&txn.description, 24)
    };

    format!(
        "{:12} {:10} {:13} {:24} {:>12}",
        txn.id.to_string(),
        txn.date.format(&options.date_format).to_string(),
        truncate(&txn.category, 13),
        description,
        format_signed_amount(txn, &options.currency)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], options: &DisplayOptions) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:13} {:24} {:>12}\n",
        "ID", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(75));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, options));
        output.push('\n');
    }

    output
}

/// The month listing, with the right message when there is nothing to show
///
/// `stored_count` is the number of transactions across all months.
pub fn format_month_listing(
    transactions: &[Transaction],
    period: MonthPeriod,
    stored_count: usize,
    options: &DisplayOptions,
) -> String {
    let mut output = format!("Transactions - {}\n", period.long_label());

    if stored_count == 0 {
        output.push_str("No transactions yet. Add one with `fintrack add`.\n");
    } else if transactions.is_empty() {
        output.push_str(&format!(
            "No transactions found for {}.\n",
            period.long_label()
        ));
    } else {
        output.push_str(&format_transaction_register(transactions, options));
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_signed_amount(txn, &options.currency)
    ));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.date.format(&options.date_format)
    ));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at.format("%Y-%m-%d %H:%M")
    ));
    if txn.updated_at != txn.created_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            txn.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }

    output
}
