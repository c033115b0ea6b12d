use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use saldo::cli::{
    handle_balance_command, handle_export_command, handle_import_command,
    handle_transaction_command, BalanceArgs, ExportArgs, TransactionCommands,
};
use saldo::config::{paths::SaldoPaths, settings::Settings};
use saldo::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "SALDO_LOG";

#[derive(Parser)]
#[command(
    name = "saldo",
    version,
    about = "Terminal personal-finance tracker",
    long_about = "Saldo keeps a list of income, expenses and investments and shows \
                  the consolidated balance (settled income minus paid expenses) and \
                  the invested balance for any period."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Initialize the data directory and settings
    Init,

    /// Show configuration
    Config,

    /// Show consolidated and invested balances
    Balance(BalanceArgs),

    /// Transaction management commands
    #[command(subcommand, alias = "tx")]
    Transaction(TransactionCommands),

    /// Import raw documents from a JSON file
    Import {
        /// Path to a JSON array or object of documents
        file: std::path::PathBuf,
    },

    /// Export transactions
    Export(ExportArgs),
}

/// Send logs to a file so they never draw over the TUI
fn setup_logging(paths: &SaldoPaths) -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .with_context(|| format!("Could not open log file {}", paths.log_file().display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SaldoPaths::new()?;
    paths.ensure_directories()?;
    setup_logging(&paths)?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Tui) => {
            saldo::tui::run_tui(&storage, &settings)?;
        }
        Some(Commands::Init) => {
            println!("Initializing Saldo at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            tracing::info!(base_dir = %paths.base_dir().display(), "initialized");
            println!("Initialization complete!");
            println!();
            println!("Run 'saldo transaction add income 100.00 --title Salary' to add a record.");
        }
        Some(Commands::Config) => {
            println!("Saldo Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Documents:        {}", paths.documents_file().display());
            println!("Log file:         {}", paths.log_file().display());
            println!(
                "Initialized:      {}",
                if storage.is_initialized() { "yes" } else { "no (run 'saldo init')" }
            );
            println!();
            println!("Settings:");
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Some(Commands::Balance(args)) => {
            handle_balance_command(&storage, &settings, args)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &file)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        None => {
            println!("Saldo - Terminal personal-finance tracker");
            println!();
            println!("Run 'saldo --help' for usage information.");
            println!("Run 'saldo tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
