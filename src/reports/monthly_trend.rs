//! Monthly Trend Report
//!
//! Income and expense per calendar month. Rows are keyed by month and
//! ordered chronologically; labels are only for display.

use std::collections::BTreeMap;
use std::io::Write;

use crate::display::report::format_bar;
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Money, MonthPeriod, Transaction, TransactionType};

/// One month of the trend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRow {
    /// Month this row covers
    pub month: MonthPeriod,
    /// Display label, e.g. "Jan 2025"
    pub month_label: String,
    pub income: Money,
    pub expense: Money,
}

impl TrendRow {
    fn new(month: MonthPeriod) -> Self {
        Self {
            month,
            month_label: month.short_label(),
            income: Money::zero(),
            expense: Money::zero(),
        }
    }

    /// Income minus expense
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Per-month income and expense over a span of months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTrend {
    /// First month of the span (inclusive)
    pub first_month: MonthPeriod,
    /// Last month of the span (inclusive)
    pub last_month: MonthPeriod,
    /// Months with at least one transaction, oldest first
    pub rows: Vec<TrendRow>,
    /// Sum of `income` over the rows
    pub year_income: Money,
    /// Sum of `expense` over the rows
    pub year_expense: Money,
}

/// Trend for one calendar year.
pub fn monthly_trend(transactions: &[Transaction], selected_year: i32) -> MonthlyTrend {
    let (first, last) = MonthPeriod::months_of_year(selected_year);
    monthly_trend_range(transactions, first, last)
}

/// Trend over an inclusive span of months, which may cross a year boundary.
///
/// An empty span (`first_month > last_month`) yields no rows.
pub fn monthly_trend_range(
    transactions: &[Transaction],
    first_month: MonthPeriod,
    last_month: MonthPeriod,
) -> MonthlyTrend {
    let mut months: BTreeMap<MonthPeriod, TrendRow> = BTreeMap::new();

    for txn in transactions {
        let month = MonthPeriod::from_date(txn.date);
        if month < first_month || month > last_month {
            continue;
        }

        let row = months.entry(month).or_insert_with(|| TrendRow::new(month));
        match txn.kind {
            TransactionType::Income => row.income += txn.amount,
            TransactionType::Expense => row.expense += txn.amount,
        }
    }

    let rows: Vec<TrendRow> = months.into_values().collect();
    let year_income = rows.iter().map(|r| r.income).sum();
    let year_expense = rows.iter().map(|r| r.expense).sum();

    MonthlyTrend {
        first_month,
        last_month,
        rows,
        year_income,
        year_expense,
    }
}

impl MonthlyTrend {
    /// Net over the whole span
    pub fn net(&self) -> Money {
        self.year_income - self.year_expense
    }

    fn title(&self) -> String {
        if self.first_month.year() == self.last_month.year()
            && self.first_month.month() == 1
            && self.last_month.month() == 12
        {
            self.first_month.year().to_string()
        } else {
            format!(
                "{} - {}",
                self.first_month.short_label(),
                self.last_month.short_label()
            )
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Monthly Trend - {}\n", self.title()));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No transactions in this period.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}  {}\n",
            "Month", "Income", "Expenses", "Net", "Spending"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        let max_expense = self
            .rows
            .iter()
            .map(|r| r.expense.as_decimal())
            .fold(0.0, f64::max);

        for row in &self.rows {
            output.push_str(&format!(
                "{:<10} {:>14} {:>14} {:>14}  {}\n",
                row.month_label,
                row.income.format_with_symbol(currency),
                row.expense.format_with_symbol(currency),
                row.net().format_with_symbol(currency),
                format_bar(row.expense.as_decimal(), max_expense, 20)
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>14} {:>14} {:>14}\n",
            "TOTAL",
            self.year_income.format_with_symbol(currency),
            self.year_expense.format_with_symbol(currency),
            self.net().format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(writer, "Month,Label,Income,Expense,Net")
            .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{:.2},{:.2},{:.2}",
                row.month,
                row.month_label,
                row.income.as_decimal(),
                row.expense.as_decimal(),
                row.net().as_decimal(),
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labels(trend: &MonthlyTrend) -> Vec<&str> {
        trend.rows.iter().map(|r| r.month_label.as_str()).collect()
    }

    #[test]
    fn test_rows_follow_calendar_not_label_order() {
        // "Feb" sorts before "Jan" as a string
        let transactions = vec![
            Transaction::expense("Food", Money::from_units(20), date(2025, 2, 3)),
            Transaction::expense("Food", Money::from_units(10), date(2025, 1, 3)),
        ];

        let trend = monthly_trend(&transactions, 2025);
        assert_eq!(labels(&trend), vec!["Jan 2025", "Feb 2025"]);
    }

    #[test]
    fn test_range_across_year_boundary() {
        let transactions = vec![
            Transaction::expense("Food", Money::from_units(10), date(2025, 1, 10)),
            Transaction::income("Salary", Money::from_units(3000), date(2024, 12, 20)),
        ];

        let trend = monthly_trend_range(
            &transactions,
            MonthPeriod::new(2024, 12).unwrap(),
            MonthPeriod::new(2025, 1).unwrap(),
        );
        assert_eq!(labels(&trend), vec!["Dec 2024", "Jan 2025"]);
        assert_eq!(trend.rows[0].income, Money::from_units(3000));
        assert_eq!(trend.rows[1].expense, Money::from_units(10));
    }

    #[test]
    fn test_year_filter_and_totals() {
        let transactions = vec![
            Transaction::income("Salary", Money::from_units(5000), date(2025, 1, 5)),
            Transaction::expense("Food", Money::from_units(250), date(2025, 1, 8)),
            Transaction::expense("Health", Money::from_units(60), date(2025, 3, 2)),
            Transaction::expense("Food", Money::from_units(999), date(2024, 12, 31)),
        ];

        let trend = monthly_trend(&transactions, 2025);
        assert_eq!(labels(&trend), vec!["Jan 2025", "Mar 2025"]);
        assert_eq!(trend.year_income, Money::from_units(5000));
        assert_eq!(trend.year_expense, Money::from_units(310));
        assert_eq!(trend.rows[0].net(), Money::from_units(4750));
    }

    #[test]
    fn test_totals_equal_row_sums() {
        let transactions: Vec<_> = (1..=12)
            .map(|m| Transaction::expense("Food", Money::from_cents(m as i64 * 101), date(2025, m, 1)))
            .collect();

        let trend = monthly_trend(&transactions, 2025);
        assert_eq!(trend.rows.len(), 12);
        let row_sum: Money = trend.rows.iter().map(|r| r.expense).sum();
        assert_eq!(row_sum, trend.year_expense);
        assert!(trend.rows.windows(2).all(|w| w[0].month < w[1].month));
    }

    #[test]
    fn test_empty_year() {
        let trend = monthly_trend(&[], 2025);
        assert!(trend.rows.is_empty());
        assert!(trend.year_income.is_zero());
        assert!(trend.format_terminal("$").contains("No transactions"));
    }

    #[test]
    fn test_csv_export() {
        let transactions = vec![Transaction::income(
            "Salary",
            Money::from_units(100),
            date(2025, 4, 1),
        )];
        let trend = monthly_trend(&transactions, 2025);

        let mut csv_output = Vec::new();
        trend.export_csv(&mut csv_output).unwrap();
        let csv_string = String::from_utf8(csv_output).unwrap();

        assert_eq!(
            csv_string,
            "Month,Label,Income,Expense,Net\n2025-04,Apr 2025,100.00,0.00,100.00\n"
        );
    }

    #[test]
    fn test_terminal_title() {
        let trend = monthly_trend(&[], 2025);
        assert!(trend.format_terminal("$").starts_with("Monthly Trend - 2025\n"));

        let span = monthly_trend_range(
            &[],
            MonthPeriod::new(2024, 11).unwrap(),
            MonthPeriod::new(2025, 4).unwrap(),
        );
        assert!(span
            .format_terminal("$")
            .starts_with("Monthly Trend - Nov 2024 - Apr 2025\n"));
    }
}
