//! Reports module for Fintrack
//!
//! The aggregation functions here are pure: they take the transactions and
//! a reference date or year as arguments, never read the clock and never
//! fail. Each has a report type wrapping it for terminal and CSV output.

pub mod budget_progress;
pub mod category_breakdown;
pub mod dashboard;
pub mod monthly_trend;
pub mod summary;

pub use budget_progress::{budget_progress, BudgetProgress, BudgetProgressReport, ProgressLevel};
pub use category_breakdown::{category_breakdown, CategoryBreakdownReport, CategoryTotal};
pub use dashboard::Dashboard;
pub use monthly_trend::{monthly_trend, monthly_trend_range, MonthlyTrend, TrendRow};
pub use summary::{period_totals, PeriodTotals};
