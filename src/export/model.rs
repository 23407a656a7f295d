use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::models::record::Record;
use crate::utils::tags::extract_tags;

/// Flattened, human-readable export row.
#[derive(Debug, Clone, Serialize)]
pub struct RecordExport {
    pub key: String,
    pub start: String,
    pub end: String,
    pub duration_seconds: i64,
    pub running: bool,
    pub description: String,
    pub tags: Vec<String>,
}

impl RecordExport {
    pub fn from_record(record: &Record, now: i64) -> Self {
        Self {
            key: record.key.clone(),
            start: rfc3339(record.start_time),
            end: if record.is_running() {
                String::new()
            } else {
                rfc3339(record.end_time)
            },
            duration_seconds: record.duration_secs(now),
            running: record.is_running(),
            description: record.description.clone(),
            tags: extract_tags(&record.description),
        }
    }
}

fn rfc3339(epoch: i64) -> String {
    match Local.timestamp_opt(epoch, 0) {
        chrono::LocalResult::Single(t) => t.to_rfc3339(),
        _ => epoch.to_string(),
    }
}
