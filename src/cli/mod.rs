//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod balance;
pub mod export;
pub mod import;
pub mod transaction;

pub use balance::{handle_balance_command, BalanceArgs};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use import::handle_import_command;
pub use transaction::{handle_transaction_command, TransactionCommands};
