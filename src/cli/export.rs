//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::error::{SaldoError, SaldoResult};
use crate::export::{export_documents_json, export_transactions_csv};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (parseable transactions only)
    Csv,
    /// JSON (every stored document, importable)
    Json,
}

/// Arguments for `saldo export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

fn create_file(path: &Path) -> SaldoResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        SaldoError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn write_export<W: Write>(storage: &Storage, args: &ExportArgs, writer: &mut W) -> SaldoResult<usize> {
    let count = match args.format {
        ExportFormat::Csv => export_transactions_csv(storage, &mut *writer)?,
        ExportFormat::Json => export_documents_json(storage, writer, !args.compact)?,
    };
    writer.flush()?;
    Ok(count)
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> SaldoResult<()> {
    match &args.output {
        Some(path) => {
            let mut writer = create_file(path)?;
            let count = write_export(storage, &args, &mut writer)?;
            println!("Exported {} record(s) to: {}", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, &args, &mut writer)?;
        }
    }
    Ok(())
}
