use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use fintrack::cli::{
    handle_budget_command, handle_dashboard_command, handle_import_command,
    handle_report_command, handle_transaction_command, BudgetCommands, ReportCommands,
    TransactionCommands,
};
use fintrack::config::{FintrackPaths, Settings};
use fintrack::storage::Storage;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "FINTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Terminal-based personal finance tracker",
    long_about = "Fintrack records income and expenses by category, totals them per \
                  month, shows where the money went and tracks spending against \
                  monthly category limits."
)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and empty data files
    Init,

    /// Show current configuration and paths
    Config,

    #[command(flatten)]
    Transaction(TransactionCommands),

    /// Budget limit commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Summary, breakdown, trend and budget reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Month overview: totals, breakdown, budgets and recent transactions
    #[command(alias = "dash")]
    Dashboard {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Import transactions from a CSV file
    Import {
        /// Path to CSV file (columns: type, category, amount, date, description, id)
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let today = chrono::Local::now().date_naive();

    let paths = FintrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Fintrack at: {}", paths.base_dir().display());
            fintrack::storage::initialize_storage(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Expense categories: {}", settings.expense_categories.join(", "));
            println!("Income categories:  {}", settings.income_categories.join(", "));
            println!();
            println!("Run 'fintrack add expense Food 12.50' to record your first expense.");
        }
        Some(Commands::Config) => {
            println!("Fintrack Configuration");
            println!("======================");
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Settings file:     {}", paths.settings_file().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Budgets file:      {}", paths.budgets_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recent limit:    {}", settings.recent_limit);
            println!("  Expense categories: {}", settings.expense_categories.join(", "));
            println!("  Income categories:  {}", settings.income_categories.join(", "));
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Dashboard { month }) => {
            handle_dashboard_command(&storage, &settings, today, month.as_deref())?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &settings, &file)?;
        }
        None => {
            handle_dashboard_command(&storage, &settings, today, None)?;
            println!();
            println!("Run 'fintrack --help' for usage information.");
        }
    }

    Ok(())
}
