//! Saldo - Terminal personal-finance tracker
//!
//! Keeps income, expense and investment records in a JSON document store and
//! reduces them into a consolidated balance (settled income minus paid
//! expenses) and an invested balance, over all time or a selected period.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, money, identifiers and date ranges
//! - `storage`: JSON document store
//! - `services`: Consolidation, period resolution, transactions, import
//! - `cli` / `display`: Command-line interface and its text output
//! - `export`: CSV and JSON export
//! - `tui`: Interactive terminal interface
//!
//! # Example
//!
//! ```rust,ignore
//! use saldo::config::{paths::SaldoPaths, settings::Settings};
//! use saldo::services::{BalanceScope, BalanceService};
//! use saldo::storage::Storage;
//!
//! let paths = SaldoPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//! let totals = BalanceService::new(&storage, &settings).consolidate(&BalanceScope::AllTime)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::SaldoError;
