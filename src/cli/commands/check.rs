use crate::api::client::ApiClient;
use crate::cli::commands::init_tracing;
use crate::config::Config;
use crate::core::zombie::{CheckOutcome, TerminalAlert, ZombieChecker};
use crate::errors::{AppError, AppResult};
use crate::utils::time::now_epoch;

/// Handle the `check` command: one zombie-checker invocation.
///
/// Exits zero on `Success` (including "nothing running" and "alert sent");
/// a `Retry` outcome becomes a non-zero exit so cron/systemd timers can
/// apply their own retry policy.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    init_tracing();

    let checker = ZombieChecker::new(ApiClient::new(cfg)?, cfg.state(), TerminalAlert);

    match checker.run_once(now_epoch()).await {
        CheckOutcome::Success => Ok(()),
        CheckOutcome::Retry => Err(AppError::Operation(
            "Zombie check could not complete; run again later".to_string(),
        )),
    }
}
