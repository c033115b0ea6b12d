//! Transaction display formatting
//!
//! Provides utilities for formatting transactions for terminal display,
//! including register views and direction indicators.

use crate::config::settings::Settings;
use crate::models::{Money, TransactionRecord};
use crate::tui::widgets::item_appearance;

/// Format a single transaction for display (register row)
pub fn format_transaction_row(record: &TransactionRecord, settings: &Settings) -> String {
    let icon = item_appearance(record.kind, record.is_income()).icon;

    format!(
        "{} {:8} {:10} {:24} {:14} {:>14}",
        icon,
        record.id.short(),
        record.date.format(&settings.date_format),
        truncate(&record.title, 24),
        truncate(&record.category, 14),
        record.amount.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(records: &[TransactionRecord], settings: &Settings) -> String {
    if records.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:1} {:8} {:10} {:24} {:14} {:>14}\n",
        "", "ID", "Date", "Title", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for record in records {
        output.push_str(&format_transaction_row(record, settings));
        output.push('\n');
    }

    let income: Money = records
        .iter()
        .filter(|r| r.is_income())
        .map(|r| r.amount)
        .sum();
    let outgoing: Money = records
        .iter()
        .filter(|r| !r.is_income())
        .map(|r| r.amount)
        .sum();

    output.push_str(&"-".repeat(76));
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s), {} in, {} out\n",
        records.len(),
        income.format_with_symbol(&settings.currency_symbol),
        outgoing.format_with_symbol(&settings.currency_symbol)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(record: &TransactionRecord, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", record.id));
    output.push_str(&format!("Title:       {}\n", record.title));
    output.push_str(&format!("Type:        {}\n", record.kind));
    output.push_str(&format!("Status:      {}\n", record.status));
    output.push_str(&format!(
        "Date:        {}\n",
        record.date.format(&settings.date_format)
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        record.amount.format_with_symbol(&settings.currency_symbol)
    ));

    if !record.category.is_empty() {
        output.push_str(&format!("Category:    {}\n", record.category));
    }
    if !record.description.is_empty() {
        output.push_str(&format!("Description: {}\n", record.description));
    }

    output
}

/// Pad or cut a string to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
