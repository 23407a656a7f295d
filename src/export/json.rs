use std::fs::File;
use std::path::Path;

use crate::errors::{AppError, AppResult};
use crate::export::model::RecordExport;

/// Write the export rows as pretty-printed JSON.
pub fn write_json(path: &Path, rows: &[RecordExport]) -> AppResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, rows).map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}
