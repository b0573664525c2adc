//! Budget Progress Report
//!
//! Spending against each category's monthly limit. Every fixed expense
//! category gets a row, in the configured order, whether or not it has a
//! limit or any spending.

use std::io::Write;

use chrono::NaiveDate;

use crate::display::report::{format_bar, format_percentage};
use crate::error::{FintrackError, FintrackResult};
use crate::models::{Budget, Money, MonthPeriod, Transaction};

use super::category_breakdown::csv_field;

/// How close a category is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressLevel {
    /// Below 80%
    Healthy,
    /// 80% up to 90%
    Warning,
    /// 90% and above
    Critical,
}

impl ProgressLevel {
    /// Short marker for terminal output
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Healthy => "",
            Self::Warning => "!",
            Self::Critical => "!!",
        }
    }
}

/// Spending against one category's limit
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub category: String,
    /// Configured limit, zero when the category is not tracked
    pub limit: Money,
    /// Expense total for the month
    pub spent: Money,
    /// `limit - spent`, negative when over
    pub remaining: Money,
    /// `spent / limit * 100`, zero without a limit
    pub percentage: f64,
    /// `spent > limit` for a tracked category
    pub is_over_budget: bool,
}

impl BudgetProgress {
    pub fn level(&self) -> ProgressLevel {
        if self.percentage < 80.0 {
            ProgressLevel::Healthy
        } else if self.percentage < 90.0 {
            ProgressLevel::Warning
        } else {
            ProgressLevel::Critical
        }
    }

    /// Percentage clamped for drawing a progress bar
    pub fn bar_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    pub fn is_tracked(&self) -> bool {
        self.limit.is_positive()
    }
}

/// Compute progress for each of `fixed_categories` in the month of `selected_date`.
///
/// Budgets are matched to categories by exact label; the first match wins.
pub fn budget_progress<S: AsRef<str>>(
    transactions: &[Transaction],
    budgets: &[Budget],
    selected_date: NaiveDate,
    fixed_categories: &[S],
) -> Vec<BudgetProgress> {
    let period = MonthPeriod::from_date(selected_date);

    fixed_categories
        .iter()
        .map(|category| {
            let category = category.as_ref();

            let limit = budgets
                .iter()
                .find(|b| b.category == category)
                .map(|b| b.limit)
                .unwrap_or_default();

            let spent: Money = transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == category && period.contains(t.date))
                .map(|t| t.amount)
                .sum();

            let percentage = if limit.is_positive() {
                spent.percent_of(limit)
            } else {
                0.0
            };

            BudgetProgress {
                category: category.to_string(),
                limit,
                spent,
                remaining: limit - spent,
                percentage,
                is_over_budget: limit.is_positive() && spent > limit,
            }
        })
        .collect()
}

/// Budget progress for one month with totals over tracked categories
#[derive(Debug, Clone)]
pub struct BudgetProgressReport {
    pub period: MonthPeriod,
    pub rows: Vec<BudgetProgress>,
    /// Sum of limits
    pub total_limit: Money,
    /// Spending in categories that have a limit
    pub total_tracked_spent: Money,
}

impl BudgetProgressReport {
    /// Generate the report for the month of `selected_date`
    pub fn generate<S: AsRef<str>>(
        transactions: &[Transaction],
        budgets: &[Budget],
        selected_date: NaiveDate,
        fixed_categories: &[S],
    ) -> Self {
        let rows = budget_progress(transactions, budgets, selected_date, fixed_categories);
        let tracked = rows.iter().filter(|r| r.is_tracked());
        let total_limit = tracked.clone().map(|r| r.limit).sum();
        let total_tracked_spent = tracked.map(|r| r.spent).sum();

        Self {
            period: MonthPeriod::from_date(selected_date),
            rows,
            total_limit,
            total_tracked_spent,
        }
    }

    /// Categories over their limit
    pub fn over_budget(&self) -> Vec<&BudgetProgress> {
        self.rows.iter().filter(|r| r.is_over_budget).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Overview - {}\n", self.period.long_label()));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        output.push_str(&format!(
            "{:<15} {:>12} {:>12} {:>12} {:>7}  {}\n",
            "Category", "Limit", "Spent", "Remaining", "Used", "Progress"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for row in &self.rows {
            if !row.is_tracked() {
                output.push_str(&format!(
                    "{:<15} {:>12} {:>12} {:>12} {:>7}\n",
                    row.category,
                    "-",
                    row.spent.format_with_symbol(currency),
                    "-",
                    "-"
                ));
                continue;
            }

            let marker = if row.is_over_budget {
                " *"
            } else {
                row.level().marker()
            };

            output.push_str(&format!(
                "{:<15} {:>12} {:>12} {:>12} {:>7}  {}{}\n",
                row.category,
                row.limit.format_with_symbol(currency),
                row.spent.format_with_symbol(currency),
                row.remaining.format_with_symbol(currency),
                format_percentage(row.percentage),
                format_bar(row.bar_percentage(), 100.0, 15),
                marker
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<15} {:>12} {:>12} {:>12}\n",
            "TRACKED TOTAL",
            self.total_limit.format_with_symbol(currency),
            self.total_tracked_spent.format_with_symbol(currency),
            (self.total_limit - self.total_tracked_spent).format_with_symbol(currency)
        ));

        output.push_str("\n* = Over budget   ! = 80% used   !! = 90% used\n");

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FintrackResult<()> {
        writeln!(
            writer,
            "Month,Category,Limit,Spent,Remaining,Percentage,Over Budget"
        )
        .map_err(|e| FintrackError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{:.2},{:.2},{:.2},{:.1},{}",
                self.period,
                csv_field(&row.category),
                row.limit.as_decimal(),
                row.spent.as_decimal(),
                row.remaining.as_decimal(),
                row.percentage,
                row.is_over_budget,
            )
            .map_err(|e| FintrackError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
