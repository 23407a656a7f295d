use crate::cli::commands::record_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::zombie::LOOKBACK_SECS;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::{duration_string, now_epoch};

/// Handle the `stop` command: close a running record.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stop { key } = cmd {
        let store = record_store(cfg)?;

        let now = now_epoch();
        let running = store.running_records(now - LOOKBACK_SECS, now).await?;

        let record = match key {
            Some(k) => running
                .into_iter()
                .find(|r| r.key == *k)
                .ok_or_else(|| AppError::RecordNotFound(k.clone()))?,
            None => running
                .into_iter()
                .next()
                .ok_or(AppError::NoRunningRecord)?,
        };

        if !store.stop_record(&record).await {
            return Err(AppError::Operation("Failed to stop record".to_string()));
        }

        success(format!(
            "Timer stopped after {}: {}",
            duration_string(record.start_time, now),
            record.description
        ));
    }
    Ok(())
}
