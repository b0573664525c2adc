//! Category Breakdown Report
//!
//! Expense totals per category for one month. Categories are grouped by
//! their exact label, then sorted by total descending with ties broken by
//! label so the output never depends on input order.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::display::report::{format_bar, format_percentage};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, MonthPeriod, Transaction};

/// Expense total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

/// Group the month's expenses by category.
pub fn category_breakdown(transactions: &[Transaction], selected_date: NaiveDate) -> Vec<CategoryTotal> {
    let period = MonthPeriod::from_date(selected_date);

    let mut totals: HashMap<&str, Money> = HashMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && period.contains(t.date))
    {
        *totals.entry(txn.category.as_str()).or_default() += txn.amount;
    }

    let mut entries: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    entries
}

/// Category breakdown with shares of the month's spending
#[derive(Debug, Clone)]
pub struct CategoryBreakdownReport {
    pub period: MonthPeriod,
    pub entries: Vec<CategoryTotal>,
    pub total: Money,
}

impl CategoryBreakdownReport {
    /// Generate the breakdown for the month of `selected_date`
    pub fn generate(transactions: &[Transaction], selected_date: NaiveDate) -> Self {
        let entries = category_breakdown(transactions, selected_date);
        let total = entries.iter().map(|e| e.total).sum();

        Self {
            period: MonthPeriod::from_date(selected_date),
            entries,
            total,
        }
    }

    /// Share of the month's spending for one entry
    pub fn share(&self, entry: &CategoryTotal) -> f64 {
        entry.total.percent_of(self.total)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spending by Category - {}\n",
            self.period.long_label()
        ));
        output.push_str(&"=".repeat(70));
        output.push('\n');

        if self.entries.is_empty() {
            output.push_str(&format!(
                "No expenses recorded for {}.\n",
                self.period.long_label()
            ));
            return output;
        }

        output.push_str(&format!(
            "{:<20} {:>14} {:>8}  {}\n",
            "Category", "Amount", "Share", ""
        ));
        output.push_str(&"-".repeat(70));
        output.push('\n');

        for entry in &self.entries {
            let share = self.share(entry);
            output.push_str(&format!(
                "{:<20} {:>14} {:>8}  {}\n",
                entry.category,
                entry.total.format_with_symbol(currency),
                format_percentage(share),
                format_bar(share, 100.0, 20)
            ));
        }

        output.push_str(&"-".repeat(70));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>14}\n",
            "TOTAL",
            self.total.format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Category,Amount,Percentage")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for entry in &self.entries {
            writeln!(
                writer,
                "{},{},{:.2},{:.1}",
                self.period,
                csv_field(&entry.category),
                entry.total.as_decimal(),
                self.share(entry),
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        writeln!(writer, "{},TOTAL,{:.2},100.0", self.period, self.total.as_decimal())
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        Ok(())
    }
}

/// Quote a free-form label if it would break the CSV row
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::summary::period_totals;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn food(units: i64, day: u32) -> Transaction {
        Transaction::expense("Food", Money::from_units(units), date(2025, 1, day))
    }

    #[test]
    fn test_same_category_is_merged() {
        let transactions = vec![food(100, 3), food(150, 20)];

        let entries = category_breakdown(&transactions, date(2025, 1, 15));
        assert_eq!(
            entries,
            vec![CategoryTotal {
                category: "Food".into(),
                total: Money::from_units(250),
            }]
        );
    }

    #[test]
    fn test_sorted_by_total_then_name() {
        let transactions = vec![
            Transaction::expense("Transport", Money::from_units(40), date(2025, 1, 2)),
            food(90, 4),
            Transaction::expense("Health", Money::from_units(40), date(2025, 1, 6)),
            Transaction::expense("Education", Money::from_units(120), date(2025, 1, 9)),
        ];

        let order: Vec<_> = category_breakdown(&transactions, date(2025, 1, 1))
            .into_iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(order, vec!["Education", "Food", "Health", "Transport"]);
    }

    #[test]
    fn test_income_and_other_months_excluded() {
        let transactions = vec![
            food(10, 5),
            Transaction::income("Salary", Money::from_units(5000), date(2025, 1, 5)),
            Transaction::expense("Food", Money::from_units(99), date(2025, 2, 5)),
        ];

        let entries = category_breakdown(&transactions, date(2025, 1, 31));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].total, Money::from_units(10));
    }

    #[test]
    fn test_labels_are_not_normalized() {
        let transactions = vec![
            food(10, 1),
            Transaction::expense("food", Money::from_units(5), date(2025, 1, 2)),
        ];

        assert_eq!(category_breakdown(&transactions, date(2025, 1, 1)).len(), 2);
    }

    #[test]
    fn test_sum_matches_period_expense() {
        let transactions = vec![
            food(100, 3),
            food(150, 20),
            Transaction::expense("Utilities", Money::from_cents(8_999), date(2025, 1, 11)),
            Transaction::income("Freelance", Money::from_units(700), date(2025, 1, 12)),
        ];
        let selected = date(2025, 1, 15);

        let breakdown_sum: Money = category_breakdown(&transactions, selected)
            .iter()
            .map(|e| e.total)
            .sum();
        assert_eq!(breakdown_sum, period_totals(&transactions, selected).expense);
    }

    #[test]
    fn test_report_csv_export() {
        let transactions = vec![
            food(75, 3),
            Transaction::expense("Shopping", Money::from_units(25), date(2025, 1, 4)),
        ];
        let report = CategoryBreakdownReport::generate(&transactions, date(2025, 1, 1));

        let mut csv_output = Vec::new();
        report.export_csv(&mut csv_output).unwrap();
        let csv_string = String::from_utf8(csv_output).unwrap();

        assert!(csv_string.starts_with("Month,Category,Amount,Percentage\n"));
        assert!(csv_string.contains("2025-01,Food,75.00,75.0"));
        assert!(csv_string.contains("2025-01,TOTAL,100.00,100.0"));
    }

    #[test]
    fn test_terminal_format() {
        let report = CategoryBreakdownReport::generate(&[food(50, 3)], date(2025, 1, 1));
        let output = report.format_terminal("$");
        assert!(output.contains("Spending by Category - January 2025"));
        assert!(output.contains("$50.00"));

        let empty = CategoryBreakdownReport::generate(&[], date(2025, 1, 1));
        assert!(empty.format_terminal("$").contains("No expenses recorded"));
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Food"), "Food");
        assert_eq!(csv_field("Bills, misc"), "\"Bills, misc\"");
    }
}
