//! Display formatting for terminal output
//!
//! Provides utilities for formatting transactions and balance reports for
//! the command-line interface.

pub mod balance;
pub mod transaction;

pub use balance::format_consolidation;
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
