//! CLI command handler for JSON import
//!
//! Merges raw documents into the store. Documents that do not parse are
//! still imported and reported, so nothing from the source is lost.

use std::path::Path;

use crate::error::{SaldoError, SaldoResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> SaldoResult<()> {
    if !file.exists() {
        return Err(SaldoError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let summary = ImportService::new(storage).import_file(file)?;

    println!("Import from '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Added:     {}", summary.added);
    println!("  Replaced:  {}", summary.replaced);

    if !summary.invalid.is_empty() {
        println!("  Unreadable: {}", summary.invalid.len());
        println!();
        println!("These documents were kept but will be skipped by every balance:");
        for id in summary.invalid.iter().take(10) {
            println!("  {}", id);
        }
        if summary.invalid.len() > 10 {
            println!("  ... and {} more", summary.invalid.len() - 10);
        }
    }

    Ok(())
}
