//! Export module for Saldo
//!
//! - CSV: one row per parseable transaction (spreadsheet-compatible)
//! - JSON: every stored document, ready to be imported again

pub mod csv;
pub mod json;

pub use csv::export_transactions_csv;
pub use json::{documents_with_ids, export_documents_json};
