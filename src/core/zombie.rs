//! Detection of "zombie" timers: records left running past a threshold.
//!
//! A recurring invoker (the `watch` loop, or cron via `check`) calls
//! [`ZombieChecker::run_once`]. Invocations must not overlap; the cursor
//! read-then-write below relies on that. Any failure maps to
//! [`CheckOutcome::Retry`] and the invoker simply tries again later; the
//! checker itself never emits a user-visible error.

use tracing::{debug, warn};

use crate::api::client::RecordsApi;
use crate::api::models::RecordsQuery;
use crate::config::state::AppState;
use crate::errors::AppResult;
use crate::ui::messages;

/// Threshold in whole hours; a timer at exactly 10h00m qualifies.
pub const ALERT_THRESHOLD_HOURS: i64 = 10;

/// Look back a full day when asking for running records, just in case.
pub const LOOKBACK_SECS: i64 = 24 * 60 * 60;

/// Terminal outcome of one checker invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Nothing to do, or an alert went out.
    Success,
    /// Transient failure; the invoking scheduler should run again later.
    Retry,
}

/// An alert about a timer that has been running too long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZombieAlert {
    pub record_key: String,
    pub hours: i64,
}

/// Destination for zombie alerts. Dispatch is fire-and-forget and keyed by
/// record: re-dispatching for the same record replaces the previous alert
/// instead of stacking a duplicate.
pub trait AlertSink {
    fn dispatch(&self, alert: &ZombieAlert) -> AppResult<()>;
}

/// Renders alerts on the terminal and in the log.
pub struct TerminalAlert;

impl AlertSink for TerminalAlert {
    fn dispatch(&self, alert: &ZombieAlert) -> AppResult<()> {
        warn!(key = %alert.record_key, hours = alert.hours, "zombie timer detected");
        messages::alert(format!(
            "Still working? A timer has been running for {} hours.",
            alert.hours
        ));
        Ok(())
    }
}

pub struct ZombieChecker<A, S> {
    api: A,
    state: AppState,
    sink: S,
}

impl<A: RecordsApi, S: AlertSink> ZombieChecker<A, S> {
    pub fn new(api: A, state: AppState, sink: S) -> Self {
        Self { api, state, sink }
    }

    /// One check cycle at time `now` (Unix seconds).
    pub async fn run_once(&self, now: i64) -> CheckOutcome {
        match self.check(now).await {
            Ok(()) => CheckOutcome::Success,
            Err(e) => {
                debug!(error = %e, "zombie check failed, will retry");
                CheckOutcome::Retry
            }
        }
    }

    async fn check(&self, now: i64) -> AppResult<()> {
        let query = RecordsQuery::running_only(now - LOOKBACK_SECS, now);
        let response = self.api.get_records(&query).await?;

        // Only the first running record in server order is considered, so a
        // second concurrent timer never triggers its own alert. Matches the
        // upstream client behavior.
        let Some(record) = response.records.first() else {
            return Ok(());
        };

        // One alert per record key: skip if we already notified on this one.
        if self.state.last_zombie_key().as_deref() == Some(record.key.as_str()) {
            return Ok(());
        }

        let hours = (now - record.start_time) / 3600;
        if hours >= ALERT_THRESHOLD_HOURS {
            // The cursor must move only after the alert actually went out,
            // and before the next invocation can run.
            self.sink.dispatch(&ZombieAlert {
                record_key: record.key.clone(),
                hours,
            })?;
            self.state.set_last_zombie_key(&record.key)?;
        }

        Ok(())
    }
}
