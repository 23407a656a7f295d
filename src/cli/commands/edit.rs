use crate::cli::commands::{find_record_or_fail, record_store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::time::parse_local_datetime;

/// Handle the `edit` command: replace description and/or time range.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        key,
        description,
        start,
        end,
    } = cmd
    {
        let store = record_store(cfg)?;
        let record = find_record_or_fail(&store, key).await?;

        let new_description = description.clone().unwrap_or(record.description.clone());
        let new_start = match start {
            Some(s) => parse_local_datetime(s)?,
            None => record.start_time,
        };
        let new_end = match end {
            Some(e) => parse_local_datetime(e)?,
            None => record.end_time,
        };

        // The remote store accepts any ordering; validating here is the
        // caller's job.
        if new_end < new_start {
            return Err(AppError::InvalidRange(
                "end must not be earlier than start".to_string(),
            ));
        }

        if !store
            .update_record(&record, &new_description, new_start, new_end)
            .await
        {
            return Err(AppError::Operation("Update failed".to_string()));
        }

        success(format!("Record {} updated", key));
    }
    Ok(())
}
