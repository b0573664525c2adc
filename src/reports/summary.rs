//! Period totals
//!
//! Income, expense and balance for the calendar month containing a
//! reference date.

use chrono::NaiveDate;

use crate::models::{Money, MonthPeriod, Transaction, TransactionType};

/// Totals for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    /// The month these totals cover
    pub period: MonthPeriod,
    /// Sum of income amounts
    pub income: Money,
    /// Sum of expense amounts
    pub expense: Money,
    /// `income - expense`
    pub balance: Money,
}

/// Sum income and expense for the month of `selected_date`.
pub fn period_totals(transactions: &[Transaction], selected_date: NaiveDate) -> PeriodTotals {
    let period = MonthPeriod::from_date(selected_date);

    let mut income = Money::zero();
    let mut expense = Money::zero();

    for txn in transactions.iter().filter(|t| period.contains(t.date)) {
        match txn.kind {
            TransactionType::Income => income += txn.amount,
            TransactionType::Expense => expense += txn.amount,
        }
    }

    PeriodTotals {
        period,
        income,
        expense,
        balance: income - expense,
    }
}

impl PeriodTotals {
    /// Balance as a percentage of income, or `None` without income
    pub fn savings_rate(&self) -> Option<f64> {
        if self.income.is_positive() {
            Some(self.balance.percent_of(self.income))
        } else {
            None
        }
    }

    /// Format the totals for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Summary - {}\n", self.period.long_label()));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!(
            "{:<30} {:>18}\n",
            "Total Income",
            self.income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<30} {:>18}\n",
            "Total Expenses",
            self.expense.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>18}\n",
            "Balance",
            self.balance.format_with_symbol(currency)
        ));

        if let Some(rate) = self.savings_rate() {
            output.push_str(&format!("{:<30} {:>18}\n", "Saved", format!("{:.1}%", rate)));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_income_expense_balance() {
        let transactions = vec![
            Transaction::income("Salary", Money::from_units(5000), date(2025, 1, 5)),
            Transaction::expense("Food", Money::from_units(250), date(2025, 1, 8)),
        ];

        let totals = period_totals(&transactions, date(2025, 1, 15));
        assert_eq!(totals.income, Money::from_units(5000));
        assert_eq!(totals.expense, Money::from_units(250));
        assert_eq!(totals.balance, Money::from_units(4750));
    }

    #[test]
    fn test_other_months_and_years_excluded() {
        let transactions = vec![
            Transaction::expense("Food", Money::from_units(10), date(2025, 1, 31)),
            Transaction::expense("Food", Money::from_units(20), date(2025, 2, 1)),
            Transaction::expense("Food", Money::from_units(40), date(2024, 1, 15)),
        ];

        let totals = period_totals(&transactions, date(2025, 1, 1));
        assert_eq!(totals.expense, Money::from_units(10));
        assert_eq!(totals.period, MonthPeriod::new(2025, 1).unwrap());
    }

    #[test]
    fn test_empty_month_is_zero() {
        let totals = period_totals(&[], date(2025, 3, 1));
        assert!(totals.income.is_zero());
        assert!(totals.expense.is_zero());
        assert!(totals.balance.is_zero());
        assert_eq!(totals.savings_rate(), None);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let transactions = vec![
            Transaction::income("Gifts", Money::from_units(50), date(2025, 1, 2)),
            Transaction::expense("Shopping", Money::from_cents(12_550), date(2025, 1, 3)),
        ];

        let totals = period_totals(&transactions, date(2025, 1, 20));
        assert_eq!(totals.balance.cents(), -7_550);
        assert_eq!(totals.balance, totals.income - totals.expense);
    }

    #[test]
    fn test_zero_amount_records_count_as_zero() {
        let transactions = vec![
            Transaction::expense("Food", Money::zero(), date(2025, 1, 2)),
            Transaction::expense("Food", Money::from_units(5), date(2025, 1, 3)),
        ];

        let totals = period_totals(&transactions, date(2025, 1, 20));
        assert_eq!(totals.expense, Money::from_units(5));
    }

    #[test]
    fn test_terminal_format() {
        let transactions = vec![Transaction::income(
            "Salary",
            Money::from_units(5000),
            date(2025, 1, 5),
        )];

        let output = period_totals(&transactions, date(2025, 1, 15)).format_terminal("$");
        assert!(output.contains("Summary - January 2025"));
        assert!(output.contains("$5000.00"));
        assert!(output.contains("Saved"));
    }

    #[test]
    fn test_oversized_amounts_saturate() {
        let huge = Money::parse("92233720368547758").unwrap();
        let transactions = vec![
            Transaction::expense("Food", huge, date(2025, 1, 5)),
            Transaction::expense("Food", huge, date(2025, 1, 6)),
        ];

        let totals = period_totals(&transactions, date(2025, 1, 15));
        assert_eq!(totals.expense.cents(), i64::MAX);
        assert_eq!(totals.balance.cents(), -i64::MAX);
    }
}
