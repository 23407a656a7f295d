// src/export/mod.rs

mod csv;
mod json;
mod model;

pub use model::RecordExport;

use clap::ValueEnum;
use std::path::Path;

use crate::errors::AppResult;
use crate::models::record::Record;
use crate::ui::messages::success;

/// Helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

/// Write the records to `path` in the requested format.
pub fn write_records(
    format: &ExportFormat,
    path: &Path,
    records: &[Record],
    now: i64,
) -> AppResult<()> {
    let rows: Vec<RecordExport> = records
        .iter()
        .map(|r| RecordExport::from_record(r, now))
        .collect();

    match format {
        ExportFormat::Csv => csv::write_csv(path, &rows)?,
        ExportFormat::Json => json::write_json(path, &rows)?,
    }

    notify_export_success(format.as_str(), path);
    Ok(())
}
