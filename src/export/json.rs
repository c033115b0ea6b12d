//! JSON Export functionality
//!
//! Dumps the store as an array of documents with their `id` inlined. Every
//! document is exported verbatim, including ones that do not parse, so the
//! output can be fed back to `saldo import`.

use std::io::Write;

use serde_json::Value;

use crate::error::{SaldoError, SaldoResult};
use crate::storage::Storage;

/// Collect stored documents with their IDs inlined
pub fn documents_with_ids(storage: &Storage) -> SaldoResult<Vec<Value>> {
    let mut documents = Vec::new();
    for id in storage.documents.ids()? {
        let Some(mut document) = storage.documents.get_raw(&id)? else {
            continue;
        };
        if let Value::Object(map) = &mut document {
            map.insert("id".to_string(), Value::String(id.to_string()));
        }
        documents.push(document);
    }
    Ok(documents)
}

/// Export every document to JSON
///
/// Returns the number of documents written.
pub fn export_documents_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> SaldoResult<usize> {
    let documents = documents_with_ids(storage)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &documents)
    } else {
        serde_json::to_writer(&mut *writer, &documents)
    }
    .map_err(|e| SaldoError::Export(e.to_string()))?;
    writeln!(writer)?;

    Ok(documents.len())
}
