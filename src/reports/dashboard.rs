//! Dashboard
//!
//! The month at a glance: totals, where the money went, budget progress and
//! the most recent transactions.

use crate::config::Settings;
use crate::display::transaction::{format_month_listing, DisplayOptions};
use crate::models::{recent_in_month, Budget, MonthPeriod, Transaction};

use super::budget_progress::BudgetProgressReport;
use super::category_breakdown::CategoryBreakdownReport;
use super::summary::{period_totals, PeriodTotals};

/// Everything shown for one month
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub period: MonthPeriod,
    pub totals: PeriodTotals,
    pub breakdown: CategoryBreakdownReport,
    pub budgets: BudgetProgressReport,
    /// Newest first, at most `settings.recent_limit`
    pub recent: Vec<Transaction>,
    /// Transactions in the store across all months
    pub stored_count: usize,
    options: DisplayOptions,
}

impl Dashboard {
    /// Build the dashboard for `period`
    pub fn generate(
        transactions: &[Transaction],
        budgets: &[Budget],
        period: MonthPeriod,
        settings: &Settings,
    ) -> Self {
        let selected = period.first_day();

        let recent = recent_in_month(transactions, period, settings.recent_limit);

        Self {
            period,
            totals: period_totals(transactions, selected),
            breakdown: CategoryBreakdownReport::generate(transactions, selected),
            budgets: BudgetProgressReport::generate(
                transactions,
                budgets,
                selected,
                settings.expense_categories.as_slice(),
            ),
            recent,
            stored_count: transactions.len(),
            options: DisplayOptions::from(settings),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self) -> String {
        let currency = &self.options.currency;
        let mut output = String::new();

        output.push_str(&self.totals.format_terminal(currency));
        output.push('\n');

        let over = self.budgets.over_budget();
        if !over.is_empty() {
            let names: Vec<_> = over.iter().map(|r| r.category.as_str()).collect();
            output.push_str(&format!("Over budget: {}\n\n", names.join(", ")));
        }

        output.push_str(&self.breakdown.format_terminal(currency));
        output.push('\n');
        output.push_str(&self.budgets.format_terminal(currency));
        output.push('\n');
        output.push_str(&format_month_listing(
            &self.recent,
            self.period,
            self.stored_count,
            &self.options,
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        let mut transactions = vec![
            Transaction::income("Salary", Money::from_units(5000), date(2025, 1, 5)),
            Transaction::expense("Food", Money::from_units(250), date(2025, 1, 8)),
            Transaction::expense("Food", Money::from_units(30), date(2024, 12, 30)),
        ];
        for day in 10..20 {
            transactions.push(Transaction::expense(
                "Transport",
                Money::from_units(2),
                date(2025, 1, day),
            ));
        }
        transactions
    }

    #[test]
    fn test_generate() {
        let budgets = vec![Budget::new("Food", Money::from_units(200))];
        let jan = MonthPeriod::new(2025, 1).unwrap();

        let dashboard = Dashboard::generate(&sample(), &budgets, jan, &Settings::default());

        assert_eq!(dashboard.totals.income, Money::from_units(5000));
        assert_eq!(dashboard.totals.expense, Money::from_units(270));
        assert_eq!(dashboard.breakdown.entries[0].category, "Food");
        assert_eq!(dashboard.budgets.rows.len(), 8);
        assert_eq!(dashboard.recent.len(), 8);
        assert_eq!(dashboard.recent[0].date, date(2025, 1, 19));
        assert_eq!(dashboard.stored_count, 13);
    }

    #[test]
    fn test_terminal_output() {
        let budgets = vec![Budget::new("Food", Money::from_units(200))];
        let jan = MonthPeriod::new(2025, 1).unwrap();

        let output =
            Dashboard::generate(&sample(), &budgets, jan, &Settings::default()).format_terminal();

        assert!(output.contains("Summary - January 2025"));
        assert!(output.contains("Over budget: Food"));
        assert!(output.contains("Transactions - January 2025"));
    }

    #[test]
    fn test_empty_month_message() {
        let feb = MonthPeriod::new(2025, 2).unwrap();
        let output = Dashboard::generate(&sample(), &[], feb, &Settings::default()).format_terminal();
        assert!(output.contains("No transactions found for February 2025."));

        let empty = Dashboard::generate(&[], &[], feb, &Settings::default()).format_terminal();
        assert!(empty.contains("No transactions yet."));
    }
}
