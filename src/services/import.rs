//! Document import service
//!
//! Merges raw documents from a JSON file into the store. Documents are kept
//! verbatim even when they do not parse, so the balance keeps reporting them
//! until they are fixed or deleted.

use std::path::Path;

use serde_json::Value;

use crate::error::{SaldoError, SaldoResult};
use crate::models::{RecordId, TransactionRecord};
use crate::storage::{read_json_required, Storage};

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Documents whose ID was new to the store
    pub added: usize,
    /// Documents that replaced an existing one
    pub replaced: usize,
    /// Imported documents that do not parse as transactions
    pub invalid: Vec<RecordId>,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.added + self.replaced
    }
}

/// Service for importing documents
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a JSON file and persist the store
    pub fn import_file(&self, path: &Path) -> SaldoResult<ImportSummary> {
        let value: Value = read_json_required(path)?;
        let summary = self.import_value(value)?;
        self.storage.documents.save()?;

        tracing::info!(
            path = %path.display(),
            added = summary.added,
            replaced = summary.replaced,
            invalid = summary.invalid.len(),
            "imported documents"
        );
        Ok(summary)
    }

    /// Merge documents into the store without saving
    ///
    /// Accepts either an array of documents (an `id` field is used when
    /// present, otherwise a fresh ID is generated) or an object mapping IDs
    /// to documents.
    pub fn import_value(&self, value: Value) -> SaldoResult<ImportSummary> {
        let entries: Vec<(RecordId, Value)> = match value {
            Value::Array(items) => items.into_iter().map(split_embedded_id).collect(),
            Value::Object(map) => map
                .into_iter()
                .map(|(id, doc)| (RecordId::from(id), doc))
                .collect(),
            _ => {
                return Err(SaldoError::Import(
                    "Expected a JSON array or an object of documents".into(),
                ))
            }
        };

        let mut summary = ImportSummary::default();
        for (id, document) in entries {
            if let Err(reason) = TransactionRecord::from_document(id.clone(), &document) {
                tracing::debug!(%id, %reason, "importing document that does not parse");
                summary.invalid.push(id.clone());
            }

            if self.storage.documents.insert_raw(id, document)? {
                summary.replaced += 1;
            } else {
                summary.added += 1;
            }
        }

        Ok(summary)
    }
}

fn split_embedded_id(mut document: Value) -> (RecordId, Value) {
    let embedded = document
        .as_object_mut()
        .and_then(|obj| obj.remove("id"))
        .and_then(|id| id.as_str().map(str::trim).map(String::from))
        .filter(|id| !id.is_empty());

    (embedded.map(RecordId::from).unwrap_or_default(), document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SaldoPaths;
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SaldoPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_import_array() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);

        let summary = service
            .import_value(json!([
                {"id": "salary", "type": "income", "status": "paid", "amount": 100, "date": "2024-01-05"},
                {"type": "expense", "status": "paid", "amount": 40, "date": "2024-01-06"},
            ]))
            .unwrap();

        assert_eq!(summary.added, 2);
        assert!(summary.invalid.is_empty());
        let stored = storage.documents.get_raw(&RecordId::from("salary")).unwrap().unwrap();
        assert!(stored.get("id").is_none());
    }

    #[test]
    fn test_import_map_replaces_and_keeps_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .documents
            .insert_raw(RecordId::from("a"), json!({}))
            .unwrap();
        let service = ImportService::new(&storage);

        let summary = service
            .import_value(json!({
                "a": {"type": "income", "status": "paid", "amount": 1, "date": "2024-01-05"},
                "b": {"type": "income", "date": "yesterday"},
            }))
            .unwrap();

        assert_eq!(summary.added, 1);
        assert_eq!(summary.replaced, 1);
        assert_eq!(summary.invalid, vec![RecordId::from("b")]);
        assert_eq!(storage.documents.count().unwrap(), 2);
    }

    #[test]
    fn test_import_rejects_scalars() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ImportService::new(&storage);
        assert!(matches!(
            service.import_value(json!(42)),
            Err(SaldoError::Import(_))
        ));
    }

    #[test]
    fn test_import_file_saves_store() {
        let (temp_dir, storage) = create_test_storage();
        let file = temp_dir.path().join("in.json");
        std::fs::write(
            &file,
            r#"[{"type": "investment", "amount": 25, "date": "2024-01-07"}]"#,
        )
        .unwrap();

        let summary = ImportService::new(&storage).import_file(&file).unwrap();
        assert_eq!(summary.total(), 1);
        assert!(storage.paths().documents_file().exists());
    }
}
