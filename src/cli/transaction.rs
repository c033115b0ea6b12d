//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{SaldoError, SaldoResult};
use crate::models::{Money, TransactionKind, TransactionStatus};
use crate::services::{
    CreateTransactionInput, PeriodService, TransactionFilter, TransactionService,
    UpdateTransactionInput,
};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Type: income, expense or investment
        kind: String,
        /// Amount (e.g., "50.00"); the type sets the direction
        amount: String,
        /// Title
        #[arg(short, long)]
        title: Option<String>,
        /// Category
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD, today, yesterday), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Status (pending, paid, received, consolidated), defaults to pending
        #[arg(short, long)]
        status: Option<String>,
        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },
    /// List transactions
    List {
        /// Period: daily, weekly, monthly or yearly
        #[arg(short, long)]
        period: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// List every transaction regardless of date
        #[arg(short, long, conflicts_with_all = ["period", "from", "to"])]
        all: bool,
        /// Filter by type
        #[arg(short, long)]
        kind: Option<String>,
        /// Filter by status
        #[arg(short, long)]
        status: Option<String>,
        /// Match title or category
        #[arg(long)]
        search: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID or unique prefix
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID or unique prefix
        id: String,
        /// New type
        #[arg(short, long)]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID or unique prefix
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_kind(s: &str) -> SaldoResult<TransactionKind> {
    s.to_lowercase().parse().map_err(|_| {
        SaldoError::Validation(format!(
            "Invalid type: '{}'. Use income, expense or investment",
            s
        ))
    })
}

fn parse_status(s: &str) -> SaldoResult<TransactionStatus> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(SaldoError::Validation("Status cannot be empty".into()));
    }
    Ok(TransactionStatus::from(trimmed.to_lowercase()))
}

fn parse_amount(s: &str) -> SaldoResult<Money> {
    Money::parse(s).map_err(|e| {
        SaldoError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '50.00'. Error: {}",
            s, e
        ))
    })
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> SaldoResult<()> {
    let service = TransactionService::new(storage);
    let periods = PeriodService::new(settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            title,
            category,
            date,
            status,
            description,
        } => {
            let kind = parse_kind(&kind)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => periods.parse_date(&d)?,
                None => periods.today(),
            };
            let status = status.as_deref().map(parse_status).transpose()?;

            let record = service.create(CreateTransactionInput {
                kind,
                amount,
                date,
                status,
                title,
                category,
                description,
            })?;

            println!("Created transaction:");
            println!("  ID:       {}", record.id);
            println!("  Title:    {}", record.title);
            println!("  Type:     {}", record.kind);
            println!("  Date:     {}", record.date.format(&settings.date_format));
            println!("  Amount:   {}", record.amount.format_with_symbol(symbol));
            if !record.category.is_empty() {
                println!("  Category: {}", record.category);
            }
            println!("  Status:   {}", record.status);
        }

        TransactionCommands::List {
            period,
            from,
            to,
            all,
            kind,
            status,
            search,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);

            if !all {
                let period_filter =
                    periods.filter_from_args(period.as_deref(), from.as_deref(), to.as_deref())?;
                let range = periods.current_range(&period_filter);
                println!("Period: {}\n", range.display_text);
                filter = filter.range(range);
            }
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(status) = status {
                filter = filter.status(parse_status(&status)?);
            }
            if let Some(search) = search {
                filter = filter.search(search);
            }

            let records = service.list(&filter)?;
            print!("{}", format_transaction_register(&records, settings));
        }

        TransactionCommands::Show { id } => {
            let id = service.resolve_id(&id)?;
            match service.get(&id) {
                Ok(record) => print!("{}", format_transaction_details(&record, settings)),
                Err(SaldoError::InvalidRecord { reason, .. }) => {
                    println!("Transaction: {}", id);
                    println!("This document cannot be read: {}", reason);
                    if let Some(raw) = storage.documents.get_raw(&id)? {
                        println!("{}", serde_json::to_string_pretty(&raw)?);
                    }
                }
                Err(e) => return Err(e),
            }
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            date,
            status,
            title,
            category,
            description,
        } => {
            let id = service.resolve_id(&id)?;
            let input = UpdateTransactionInput {
                kind: kind.as_deref().map(parse_kind).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(|d| periods.parse_date(d)).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
                title,
                category,
                description,
            };

            if input.is_empty() {
                println!("Nothing to change. Pass at least one field to edit.");
                return Ok(());
            }

            let updated = service.update(&id, input)?;
            println!("Updated transaction: {}", updated.id);
            println!("  Title:  {}", updated.title);
            println!("  Date:   {}", updated.date.format(&settings.date_format));
            println!("  Amount: {}", updated.amount.format_with_symbol(symbol));
            println!("  Status: {}", updated.status);
        }

        TransactionCommands::Delete { id, force } => {
            let id = service.resolve_id(&id)?;

            if !force {
                println!("About to delete transaction:");
                match service.get(&id) {
                    Ok(record) => print!("{}", format_transaction_details(&record, settings)),
                    Err(_) => println!("  ID: {} (unreadable document)", id),
                }
                println!();
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            service.delete(&id)?;
            println!("Deleted transaction: {}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_is_case_insensitive() {
        assert_eq!(parse_kind("Income").unwrap(), TransactionKind::Income);
        assert_eq!(parse_kind("INVESTMENT").unwrap(), TransactionKind::Investment);
        assert!(parse_kind("transfer").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_status_keeps_unknown_values() {
        assert_eq!(parse_status("Paid").unwrap(), TransactionStatus::Paid);
        assert_eq!(
            parse_status("scheduled").unwrap(),
            TransactionStatus::Other("scheduled".into())
        );
        assert!(parse_status("  ").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("12.34").unwrap().cents(), 1234);
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }
}
