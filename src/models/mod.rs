//! Core data models for Saldo
//!
//! Transaction records, money, identifiers and period/date-range types.

pub mod ids;
pub mod money;
pub mod period;
pub mod record;

pub use ids::RecordId;
pub use money::Money;
pub use period::{DateRange, PeriodFilter, PeriodKind};
pub use record::{
    parse_documents, ParsedBatch, ParsedDocument, RecordError, SkippedRecord, TransactionKind,
    TransactionRecord, TransactionStatus, UNTITLED,
};
