//! CLI commands for reports
//!
//! Terminal output by default; breakdown, trend and budget reports can be
//! exported to CSV with `--output`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{FintrackError, FintrackResult};
use crate::models::MonthPeriod;
use crate::reports::{
    monthly_trend, monthly_trend_range, period_totals, BudgetProgressReport,
    CategoryBreakdownReport, Dashboard,
};
use crate::storage::Storage;

use super::{create_export_file, parse_month};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and balance for a month
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Spending by category for a month
    #[command(alias = "spending")]
    Breakdown {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Income and expenses per month
    Trend {
        /// Calendar year, defaults to the current year
        #[arg(short, long, conflicts_with = "months")]
        year: Option<i32>,

        /// Rolling window of N months ending with the current month (or --through)
        #[arg(long)]
        months: Option<u32>,

        /// Last month of the rolling window (YYYY-MM)
        #[arg(long, requires = "months")]
        through: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending against each category's limit
    Budget {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ReportCommands,
) -> FintrackResult<()> {
    let transactions = storage.transactions.get_all()?;
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { month } => {
            let period = parse_month(month.as_deref(), today)?;
            let totals = period_totals(&transactions, period.first_day());
            print!("{}", totals.format_terminal(currency));
        }

        ReportCommands::Breakdown { month, output } => {
            let period = parse_month(month.as_deref(), today)?;
            let report = CategoryBreakdownReport::generate(&transactions, period.first_day());

            if let Some(path) = output {
                let mut writer = create_export_file(&path)?;
                report.export_csv(&mut writer)?;
                println!("Category breakdown exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(currency));
            }
        }

        ReportCommands::Trend {
            year,
            months,
            through,
            output,
        } => {
            let trend = match months {
                Some(n) => {
                    let last = parse_month(through.as_deref(), today)?;
                    let (first, last) = rolling_window(last, n)?;
                    monthly_trend_range(&transactions, first, last)
                }
                None => monthly_trend(
                    &transactions,
                    year.unwrap_or_else(|| MonthPeriod::current(today).year()),
                ),
            };

            if let Some(path) = output {
                let mut writer = create_export_file(&path)?;
                trend.export_csv(&mut writer)?;
                println!("Monthly trend exported to: {}", path.display());
            } else {
                print!("{}", trend.format_terminal(currency));
            }
        }

        ReportCommands::Budget { month, output } => {
            let period = parse_month(month.as_deref(), today)?;
            let budgets = storage.budgets.get_all()?;
            let report = BudgetProgressReport::generate(
                &transactions,
                &budgets,
                period.first_day(),
                settings.expense_categories.as_slice(),
            );

            if let Some(path) = output {
                let mut writer = create_export_file(&path)?;
                report.export_csv(&mut writer)?;
                println!("Budget report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(currency));
            }
        }
    }

    Ok(())
}

/// The `months`-long span of months ending with `last`
fn rolling_window(last: MonthPeriod, months: u32) -> FintrackResult<(MonthPeriod, MonthPeriod)> {
    if months == 0 {
        return Err(FintrackError::Validation(
            "--months must be at least 1".into(),
        ));
    }
    let first = (1..months).fold(last, |m, _| m.prev());
    Ok((first, last))
}

/// Show the month dashboard
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    month: Option<&str>,
) -> FintrackResult<()> {
    let period = parse_month(month, today)?;
    let transactions = storage.transactions.get_all()?;
    let budgets = storage.budgets.get_all()?;

    let dashboard = Dashboard::generate(&transactions, &budgets, period, settings);
    print!("{}", dashboard.format_terminal());

    let quarantined = storage.transactions.quarantined_count()?;
    if quarantined > 0 {
        println!(
            "\nNote: {} stored record(s) have unreadable dates and are left out of all reports.",
            quarantined
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(y: i32, m: u32) -> MonthPeriod {
        MonthPeriod::new(y, m).unwrap()
    }

    #[test]
    fn test_rolling_window() {
        assert_eq!(
            rolling_window(month(2025, 1), 1).unwrap(),
            (month(2025, 1), month(2025, 1))
        );
        assert_eq!(
            rolling_window(month(2025, 1), 2).unwrap(),
            (month(2024, 12), month(2025, 1))
        );
        assert_eq!(
            rolling_window(month(2025, 3), 14).unwrap(),
            (month(2024, 2), month(2025, 3))
        );
    }

    #[test]
    fn test_rolling_window_rejects_zero() {
        let err = rolling_window(month(2025, 1), 0).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("--months must be at least 1"));
    }
}
