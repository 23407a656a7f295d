use std::time::Duration;

use tracing::debug;

use crate::api::client::ApiClient;
use crate::cli::commands::init_tracing;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::zombie::{ALERT_THRESHOLD_HOURS, CheckOutcome, TerminalAlert, ZombieChecker};
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::time::now_epoch;

/// Delay before the next attempt after a transient failure, instead of
/// waiting for the full interval.
const RETRY_DELAY_SECS: u64 = 60;

/// Handle the `watch` command: the recurring scheduler around the zombie
/// checker. Checks never overlap; each one completes before the loop
/// sleeps.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Watch { interval } = cmd {
        init_tracing();

        let checker = ZombieChecker::new(ApiClient::new(cfg)?, cfg.state(), TerminalAlert);
        let interval = Duration::from_secs((*interval).max(1) * 60);

        info(format!(
            "Watching for timers running longer than {}h (checking every {} min, Ctrl-C to stop)",
            ALERT_THRESHOLD_HOURS,
            interval.as_secs() / 60
        ));

        loop {
            let delay = match checker.run_once(now_epoch()).await {
                CheckOutcome::Success => interval,
                CheckOutcome::Retry => {
                    debug!("check hit a transient failure, retrying sooner");
                    Duration::from_secs(RETRY_DELAY_SECS).min(interval)
                }
            };
            tokio::time::sleep(delay).await;
        }
    }
    Ok(())
}
