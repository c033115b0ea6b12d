//! Document repository for JSON storage
//!
//! Holds the transaction collection as opaque key/value documents, the way a
//! document database would, and persists them to `documents.json`. Typed
//! records are produced on the way out and turned back into documents on the
//! way in; a document that does not parse is kept verbatim.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::SaldoError;
use crate::models::{parse_documents, ParsedBatch, RecordId, TransactionRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable document collection
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DocumentData {
    #[serde(default)]
    documents: BTreeMap<RecordId, Value>,
}

/// Repository for transaction documents
pub struct DocumentRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<RecordId, Value>>,
}

fn lock_error(e: impl std::fmt::Display) -> SaldoError {
    SaldoError::Storage(format!("Failed to acquire document lock: {}", e))
}

impl DocumentRepository {
    /// Create a new document repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load documents from disk, replacing anything in memory
    pub fn load(&self) -> Result<(), SaldoError> {
        let file_data: DocumentData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data.documents;
        tracing::debug!(count = data.len(), path = %self.path.display(), "loaded documents");
        Ok(())
    }

    /// Save documents to disk
    pub fn save(&self) -> Result<(), SaldoError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = DocumentData {
            documents: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the raw document stored under an ID
    pub fn get_raw(&self, id: &RecordId) -> Result<Option<Value>, SaldoError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(id).cloned())
    }

    /// Get a record by ID
    ///
    /// A stored document that does not parse is reported as
    /// [`SaldoError::InvalidRecord`].
    pub fn get(&self, id: &RecordId) -> Result<Option<TransactionRecord>, SaldoError> {
        let Some(document) = self.get_raw(id)? else {
            return Ok(None);
        };

        TransactionRecord::from_document(id.clone(), &document)
            .map(|parsed| Some(parsed.record))
            .map_err(|reason| SaldoError::InvalidRecord {
                identifier: id.to_string(),
                reason: reason.to_string(),
            })
    }

    /// Parse every stored document
    ///
    /// Records come back newest first; unparseable documents are listed in
    /// `skipped`.
    pub fn records(&self) -> Result<ParsedBatch, SaldoError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut batch = parse_documents(data.iter().map(|(id, doc)| (Some(id.clone()), doc)));
        batch
            .records
            .sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(batch)
    }

    /// Insert or replace the document for a record
    pub fn upsert(&self, record: &TransactionRecord) -> Result<(), SaldoError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(record.id.clone(), record.to_document());
        Ok(())
    }

    /// Insert a document as-is, without validation
    ///
    /// Returns true if a document with the same ID was replaced.
    pub fn insert_raw(&self, id: RecordId, document: Value) -> Result<bool, SaldoError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.insert(id, document).is_some())
    }

    /// Delete a document
    pub fn delete(&self, id: &RecordId) -> Result<bool, SaldoError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(id).is_some())
    }

    /// IDs of every stored document, in key order
    pub fn ids(&self) -> Result<Vec<RecordId>, SaldoError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.keys().cloned().collect())
    }

    /// Count stored documents, parseable or not
    pub fn count(&self) -> Result<usize, SaldoError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind, TransactionStatus};
    use chrono::NaiveDate;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, DocumentRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = DocumentRepository::new(temp_dir.path().join("documents.json"));
        (temp_dir, repo)
    }

    fn record(day: u32, cents: i64) -> TransactionRecord {
        TransactionRecord::new(
            TransactionKind::Expense,
            TransactionStatus::Paid,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            "Market",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.records().unwrap().records.is_empty());
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let rec = record(5, 4000);

        repo.upsert(&rec).unwrap();

        assert_eq!(repo.get(&rec.id).unwrap(), Some(rec.clone()));
        assert_eq!(repo.get_raw(&rec.id).unwrap().unwrap()["amount"], 40.0);
    }

    #[test]
    fn test_records_sorted_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(&record(3, 100)).unwrap();
        repo.upsert(&record(20, 200)).unwrap();
        repo.upsert(&record(11, 300)).unwrap();

        let days: Vec<u32> = repo
            .records()
            .unwrap()
            .records
            .iter()
            .map(|r| chrono::Datelike::day(&r.date))
            .collect();
        assert_eq!(days, vec![20, 11, 3]);
    }

    #[test]
    fn test_invalid_documents_are_kept_and_reported() {
        let (_temp_dir, repo) = create_test_repo();
        let id = RecordId::from("broken");
        repo.insert_raw(id.clone(), json!({"type": "income", "date": "05/01/2024"}))
            .unwrap();
        repo.upsert(&record(5, 100)).unwrap();

        let batch = repo.records().unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].document_id, Some(id.clone()));
        assert_eq!(repo.count().unwrap(), 2);

        let err = repo.get(&id).unwrap_err();
        assert!(matches!(err, SaldoError::InvalidRecord { .. }));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let rec = record(5, 4000);
        repo.upsert(&rec).unwrap();
        repo.insert_raw(RecordId::from("raw"), json!({"anything": true}))
            .unwrap();
        repo.save().unwrap();

        let reloaded = DocumentRepository::new(temp_dir.path().join("documents.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.count().unwrap(), 2);
        assert_eq!(reloaded.get(&rec.id).unwrap(), Some(rec));
        assert_eq!(
            reloaded.get_raw(&RecordId::from("raw")).unwrap(),
            Some(json!({"anything": true}))
        );
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let rec = record(5, 4000);
        repo.upsert(&rec).unwrap();

        assert!(repo.delete(&rec.id).unwrap());
        assert!(!repo.delete(&rec.id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
