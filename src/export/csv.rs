use csv::Writer;
use std::path::Path;

use crate::errors::{AppError, AppResult};
use crate::export::model::RecordExport;

/// Write the export rows as CSV.
pub fn write_csv(path: &Path, rows: &[RecordExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path).map_err(|e| AppError::Export(e.to_string()))?;

    wtr.write_record([
        "key",
        "start",
        "end",
        "duration_seconds",
        "running",
        "description",
        "tags",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        wtr.write_record(&[
            row.key.clone(),
            row.start.clone(),
            row.end.clone(),
            row.duration_seconds.to_string(),
            row.running.to_string(),
            row.description.clone(),
            row.tags.join(" "),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}
