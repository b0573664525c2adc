//! Budget CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::FintrackResult;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the monthly limit for an expense category (0 stops tracking it)
    Set {
        /// Expense category
        category: String,
        /// Monthly limit (e.g., "200" or "350.50")
        #[arg(allow_hyphen_values = true)]
        limit: String,
    },
    /// List the configured limits
    #[command(alias = "ls")]
    List,
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FintrackResult<()> {
    let catalog = settings.catalog();
    let service = BudgetService::new(storage, &catalog);

    match cmd {
        BudgetCommands::Set { category, limit } => {
            let budget = service.set_limit(&category, &limit)?;
            if budget.is_tracked() {
                println!(
                    "Budget for {} set to {}",
                    budget.category,
                    budget.limit.format_with_symbol(&settings.currency_symbol)
                );
            } else {
                println!("Budget for {} cleared (not tracked)", budget.category);
            }
        }
        BudgetCommands::List => {
            let budgets = service.list()?;
            print!(
                "{}",
                format_budget_list(&budgets, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
