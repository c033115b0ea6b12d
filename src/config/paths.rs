//! Path management for Saldo
//!
//! ## Path Resolution Order
//!
//! 1. `SALDO_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/saldo` on Linux, `~/Library/Application Support/saldo` on
//!    macOS, `%APPDATA%\saldo` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SaldoError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SALDO_DATA_DIR";

/// Manages all paths used by Saldo
#[derive(Debug, Clone)]
pub struct SaldoPaths {
    /// Base directory for all Saldo data
    base_dir: PathBuf,
}

impl SaldoPaths {
    /// Create a new SaldoPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform config
    /// directory cannot be determined.
    pub fn new() -> Result<Self, SaldoError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create SaldoPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the document store
    pub fn documents_file(&self) -> PathBuf {
        self.data_dir().join("documents.json")
    }

    /// Get the path to the application log
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("saldo.log")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SaldoError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SaldoError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SaldoError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Saldo has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, SaldoError> {
    ProjectDirs::from("", "", "saldo")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| SaldoError::Config("Could not determine a home directory".into()))
}
