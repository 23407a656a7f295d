use crate::cli::commands::record_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Handle the `start` command: begin a new timer.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { description } = cmd {
        let state = cfg.state();

        // With no description, fall back to the last one we started.
        let description = match description {
            Some(d) => d.clone(),
            None => state.last_description().ok_or_else(|| {
                AppError::Operation(
                    "No description given and no previous one to reuse".to_string(),
                )
            })?,
        };

        let store = record_store(cfg)?;
        if !store.start_record(&description).await {
            return Err(AppError::Operation("Failed to start timer".to_string()));
        }

        state.set_last_description(&description)?;
        success(format!("Timer started: {}", description));
    }
    Ok(())
}
