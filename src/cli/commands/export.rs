use std::path::Path;

use crate::cli::commands::{list::resolve_window, record_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::write_records;
use crate::utils::time::now_epoch;

/// Handle the `export` command: dump the fetched window to a file.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = cmd
    {
        let path = Path::new(file);
        if path.exists() && !force {
            return Err(AppError::Export(format!(
                "file {} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let (start, end) = resolve_window(period, false, false, cfg)?;
        let store = record_store(cfg)?;
        let records = store.fetch_records(start, end).await;

        write_records(format, path, &records, now_epoch())?;
    }
    Ok(())
}
