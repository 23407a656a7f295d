pub mod check;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod login;
pub mod start;
pub mod stop;
pub mod tags;
pub mod watch;

use crate::api::client::{ApiClient, RecordsApi};
use crate::config::Config;
use crate::core::records::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::models::record::Record;
use crate::utils::time;

/// How far back key-addressed commands (`edit`, `del`, `stop KEY`) search
/// for their record.
const KEY_SEARCH_DAYS: i64 = 365;

/// Build the record store for the configured server, or fail when no
/// session exists.
pub(crate) fn record_store(cfg: &Config) -> AppResult<RecordStore<ApiClient>> {
    Ok(RecordStore::new(ApiClient::new(cfg)?))
}

/// Locate a record by key within the last year of records.
pub(crate) async fn find_record_or_fail<A: RecordsApi>(
    store: &RecordStore<A>,
    key: &str,
) -> AppResult<Record> {
    let (start, end) = time::last_days_window(KEY_SEARCH_DAYS);
    store
        .find_record(key, start, end)
        .await
        .ok_or_else(|| AppError::RecordNotFound(key.to_string()))
}

/// Initialize diagnostic logging for the background commands. Defaults to
/// info-level for this crate; RUST_LOG overrides.
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rtagger=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
