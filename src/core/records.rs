//! Record lifecycle operations against the remote store.
//!
//! Every mutation is a single-record `PUT`; success means the server listed
//! the key in `accepted`. Callers are expected to re-fetch the active window
//! after a successful mutation to see a consistent view; there is no push
//! channel, no batching and no automatic retry. Concurrent mutations on the
//! same key are resolved by the server's last-write-wins on `mt`.

use tracing::debug;

use crate::api::client::RecordsApi;
use crate::api::models::RecordsQuery;
use crate::errors::AppResult;
use crate::models::record::Record;
use crate::utils::time::now_epoch;

pub struct RecordStore<A: RecordsApi> {
    api: A,
}

impl<A: RecordsApi> RecordStore<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Start a new timer with a freshly generated key.
    pub async fn start_record(&self, description: &str) -> bool {
        self.put_single(Record::new_started(description, now_epoch()))
            .await
    }

    /// Close a running record at the current time.
    pub async fn stop_record(&self, record: &Record) -> bool {
        self.put_single(record.stopped(now_epoch())).await
    }

    /// Replace description and time range. Ordering of `new_end >=
    /// new_start` is the caller's responsibility; no check happens here.
    pub async fn update_record(
        &self,
        record: &Record,
        new_description: &str,
        new_start: i64,
        new_end: i64,
    ) -> bool {
        self.put_single(record.edited(new_description, new_start, new_end, now_epoch()))
            .await
    }

    /// Logical delete: the record stays on the server with its description
    /// rewritten under the hidden marker.
    pub async fn delete_record(&self, record: &Record) -> bool {
        self.put_single(record.tombstoned(now_epoch())).await
    }

    async fn put_single(&self, record: Record) -> bool {
        let key = record.key.clone();
        match self.api.put_records(std::slice::from_ref(&record)).await {
            Ok(response) => response.accepted.contains(&key),
            Err(e) => {
                debug!(key = %key, error = %e, "record PUT failed");
                false
            }
        }
    }

    /// All visible records intersecting `[start, end]`, sorted by start
    /// time descending (most recent first). Hidden records are filtered
    /// out; transport failures yield an empty list.
    pub async fn fetch_records(&self, start: i64, end: i64) -> Vec<Record> {
        match self.api.get_records(&RecordsQuery::window(start, end)).await {
            Ok(response) => {
                let mut records: Vec<Record> = response
                    .records
                    .into_iter()
                    .filter(|r| !r.is_hidden())
                    .collect();
                records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
                records
            }
            Err(e) => {
                debug!(error = %e, "error fetching records");
                Vec::new()
            }
        }
    }

    /// Locate a record by key within a window. Hidden records are never
    /// found, matching what `fetch_records` shows.
    pub async fn find_record(&self, key: &str, start: i64, end: i64) -> Option<Record> {
        self.fetch_records(start, end)
            .await
            .into_iter()
            .find(|r| r.key == key)
    }

    /// In-progress records within a window, in server order. Unlike the
    /// fetch path this propagates errors: callers need to distinguish
    /// "nothing running" from "could not ask".
    pub async fn running_records(&self, start: i64, end: i64) -> AppResult<Vec<Record>> {
        let response = self
            .api
            .get_records(&RecordsQuery::running_only(start, end))
            .await?;
        Ok(response.records)
    }
}
