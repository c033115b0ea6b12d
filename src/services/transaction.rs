//! Transaction service
//!
//! CRUD over transaction records, with validation and filtering. Every
//! mutation is persisted immediately.

use chrono::NaiveDate;

use crate::error::{SaldoError, SaldoResult};
use crate::models::{
    DateRange, Money, RecordId, TransactionKind, TransactionRecord, TransactionStatus, UNTITLED,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub status: Option<TransactionStatus>,
    pub range: Option<DateRange>,
    /// Case-insensitive match on title or category
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, record: &TransactionRecord) -> bool {
        if self.kind.is_some_and(|k| k != record.kind) {
            return false;
        }
        if self.status.as_ref().is_some_and(|s| *s != record.status) {
            return false;
        }
        if self.range.as_ref().is_some_and(|r| !r.contains(record.date)) {
            return false;
        }
        if let Some(text) = &self.search {
            let needle = text.to_lowercase();
            if !record.title.to_lowercase().contains(&needle)
                && !record.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub amount: Money,
    pub date: NaiveDate,
    pub status: Option<TransactionStatus>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Fields to change on an existing transaction
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub kind: Option<TransactionKind>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub status: Option<TransactionStatus>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.status.is_none()
            && self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }
}

fn validate_amount(amount: Money) -> SaldoResult<()> {
    if amount.is_negative() {
        return Err(SaldoError::Validation(
            "Amount must not be negative; the transaction type sets the direction".into(),
        ));
    }
    Ok(())
}

fn clean_title(title: Option<String>) -> String {
    title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> SaldoResult<TransactionRecord> {
        validate_amount(input.amount)?;

        let mut record = TransactionRecord::new(
            input.kind,
            input.status.unwrap_or_default(),
            input.amount,
            input.date,
            clean_title(input.title),
        );
        record.category = input.category.unwrap_or_default().trim().to_string();
        record.description = input.description.unwrap_or_default().trim().to_string();

        self.storage.documents.upsert(&record)?;
        self.storage.documents.save()?;

        tracing::info!(id = %record.id, kind = %record.kind, "created transaction");
        Ok(record)
    }

    /// Get a transaction by its full ID
    pub fn get(&self, id: &RecordId) -> SaldoResult<TransactionRecord> {
        self.storage
            .documents
            .get(id)?
            .ok_or_else(|| SaldoError::transaction_not_found(id.as_str()))
    }

    /// Resolve a full ID or an unambiguous ID prefix
    pub fn resolve_id(&self, query: &str) -> SaldoResult<RecordId> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SaldoError::Validation("Transaction ID is required".into()));
        }

        let ids = self.storage.documents.ids()?;
        if let Some(exact) = ids.iter().find(|id| id.as_str() == query) {
            return Ok(exact.clone());
        }

        let mut matches = ids.into_iter().filter(|id| id.as_str().starts_with(query));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (Some(_), Some(_)) => Err(SaldoError::Validation(format!(
                "ID prefix '{}' matches more than one transaction",
                query
            ))),
            (None, _) => Err(SaldoError::transaction_not_found(query)),
        }
    }

    /// Apply changes to an existing transaction
    pub fn update(
        &self,
        id: &RecordId,
        input: UpdateTransactionInput,
    ) -> SaldoResult<TransactionRecord> {
        let mut record = self.get(id)?;

        if let Some(amount) = input.amount {
            validate_amount(amount)?;
            record.amount = amount;
        }
        if let Some(kind) = input.kind {
            record.kind = kind;
        }
        if let Some(date) = input.date {
            record.date = date;
        }
        if let Some(status) = input.status {
            record.status = status;
        }
        if input.title.is_some() {
            record.title = clean_title(input.title);
        }
        if let Some(category) = input.category {
            record.category = category.trim().to_string();
        }
        if let Some(description) = input.description {
            record.description = description.trim().to_string();
        }

        self.storage.documents.upsert(&record)?;
        self.storage.documents.save()?;

        tracing::info!(id = %record.id, "updated transaction");
        Ok(record)
    }

    /// Delete a transaction document
    ///
    /// Works for documents that do not parse, so broken entries can be
    /// cleaned out of the store.
    pub fn delete(&self, id: &RecordId) -> SaldoResult<()> {
        if !self.storage.documents.delete(id)? {
            return Err(SaldoError::transaction_not_found(id.as_str()));
        }
        self.storage.documents.save()?;

        tracing::info!(%id, "deleted transaction");
        Ok(())
    }

    /// List transactions matching a filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> SaldoResult<Vec<TransactionRecord>> {
        let batch = self.storage.documents.records()?;
        let matching = batch.records.into_iter().filter(|r| filter.matches(r));

        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SaldoPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SaldoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn input(kind: TransactionKind, cents: i64, day: u32, title: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            kind,
            amount: Money::from_cents(cents),
            date: date(day),
            status: None,
            title: Some(title.to_string()),
            category: None,
            description: None,
        }
    }

    #[test]
    fn test_create_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let created = service
            .create(CreateTransactionInput {
                category: Some("  Food ".into()),
                ..input(TransactionKind::Expense, 4000, 6, "Market")
            })
            .unwrap();

        assert_eq!(created.status, TransactionStatus::Pending);
        assert_eq!(created.category, "Food");
        assert_eq!(service.get(&created.id).unwrap(), created);
        assert!(storage.paths().documents_file().exists());
    }

    #[test]
    fn test_create_rejects_negative_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service
            .create(input(TransactionKind::Expense, -1, 6, "Market"))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_title_becomes_untitled() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let created = service
            .create(input(TransactionKind::Income, 100, 1, "   "))
            .unwrap();
        assert_eq!(created.title, UNTITLED);
    }

    #[test]
    fn test_update_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let created = service
            .create(input(TransactionKind::Expense, 4000, 6, "Market"))
            .unwrap();

        let updated = service
            .update(
                &created.id,
                UpdateTransactionInput {
                    status: Some(TransactionStatus::Paid),
                    amount: Some(Money::from_cents(4500)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, TransactionStatus::Paid);
        assert_eq!(updated.amount.cents(), 4500);
        assert_eq!(updated.title, "Market");
        assert_eq!(service.get(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_delete_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let created = service
            .create(input(TransactionKind::Income, 100, 1, "Gift"))
            .unwrap();

        service.delete(&created.id).unwrap();
        assert!(service.get(&created.id).unwrap_err().is_not_found());
        assert!(service.delete(&created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .documents
            .insert_raw(RecordId::from("abc123"), serde_json::json!({}))
            .unwrap();
        storage
            .documents
            .insert_raw(RecordId::from("abd456"), serde_json::json!({}))
            .unwrap();
        let service = TransactionService::new(&storage);

        assert_eq!(service.resolve_id("abc").unwrap().as_str(), "abc123");
        assert_eq!(service.resolve_id("abd456").unwrap().as_str(), "abd456");
        assert!(service.resolve_id("ab").unwrap_err().is_validation());
        assert!(service.resolve_id("zzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_with_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        service.create(input(TransactionKind::Income, 100, 2, "Salary")).unwrap();
        service.create(input(TransactionKind::Expense, 200, 12, "Rent")).unwrap();
        service.create(input(TransactionKind::Expense, 300, 22, "Market")).unwrap();

        let all = service.list(&TransactionFilter::new()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "Market");

        let expenses = service
            .list(&TransactionFilter::new().kind(TransactionKind::Expense))
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let in_range = service
            .list(&TransactionFilter::new().range(DateRange::new(date(1), date(15))))
            .unwrap();
        assert_eq!(in_range.len(), 2);

        let searched = service
            .list(&TransactionFilter::new().search("RENT"))
            .unwrap();
        assert_eq!(searched.len(), 1);

        let limited = service.list(&TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }
}
