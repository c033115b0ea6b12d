//! Service layer for Saldo
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, balance consolidation and period resolution.

pub mod consolidation;
pub mod import;
pub mod period;
pub mod transaction;

pub use consolidation::{
    consolidate, consolidate_batch, consolidate_documents, BalanceScope, BalanceService,
    Consolidation,
};
pub use import::{ImportService, ImportSummary};
pub use period::PeriodService;
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
