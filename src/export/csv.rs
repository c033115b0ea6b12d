//! CSV Export functionality
//!
//! Writes every parseable transaction as one spreadsheet row. Documents that
//! do not parse are left out and logged.

use std::io::Write;

use crate::error::SaldoResult;
use crate::models::record::DOCUMENT_DATE_FORMAT;
use crate::storage::Storage;

const HEADER: [&str; 7] = ["id", "date", "type", "status", "title", "category", "amount"];

/// Export all transactions to CSV
///
/// Returns the number of rows written, not counting the header.
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> SaldoResult<usize> {
    let batch = storage.documents.records()?;
    for skipped in &batch.skipped {
        tracing::warn!(%skipped, "document left out of CSV export");
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for record in &batch.records {
        let date = record.date.format(DOCUMENT_DATE_FORMAT).to_string();
        let amount = record.amount.to_string();
        csv_writer.write_record([
            record.id.as_str(),
            date.as_str(),
            record.kind.as_str(),
            record.status.as_str(),
            record.title.as_str(),
            record.category.as_str(),
            amount.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(batch.records.len())
}
