//! Storage layer for Saldo
//!
//! Provides the JSON document store with atomic writes and automatic
//! directory creation.

pub mod documents;
pub mod file_io;

pub use documents::DocumentRepository;
pub use file_io::{read_json, read_json_required, write_json_atomic};

use crate::config::paths::SaldoPaths;
use crate::error::SaldoError;

/// Main storage coordinator
pub struct Storage {
    paths: SaldoPaths,
    pub documents: DocumentRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: SaldoPaths) -> Result<Self, SaldoError> {
        paths.ensure_directories()?;

        Ok(Self {
            documents: DocumentRepository::new(paths.documents_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SaldoPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SaldoError> {
        self.documents.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SaldoError> {
        self.documents.save()
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
