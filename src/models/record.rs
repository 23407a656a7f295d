use crate::utils::keygen;
use serde::{Deserialize, Serialize};

/// Description prefix marking a soft-deleted record (TimeTagger convention).
/// Hidden records stay on the server but are excluded from every view.
pub const HIDDEN_PREFIX: &str = "HIDDEN ";

/// One time-tracking entry as stored by the server.
///
/// A record is *running* while its end timestamp still equals its start
/// timestamp. All timestamps are Unix seconds except `server_time`, which is
/// a floating-point server-assigned value the client never interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: String, // ⇔ wire "key", client-generated, stable

    #[serde(rename = "t1")]
    pub start_time: i64,
    #[serde(rename = "t2")]
    pub end_time: i64,
    #[serde(rename = "mt")]
    pub modified_time: i64,

    /// Free text; may embed #-prefixed tags (e.g. "#work").
    #[serde(rename = "ds")]
    pub description: String,

    /// Server timestamp, 0.0 until the record has been persisted remotely.
    #[serde(rename = "st")]
    pub server_time: f64,
}

impl Record {
    /// Build a freshly started record: a new random key and
    /// `start = end = modified = now`.
    pub fn new_started(description: &str, now: i64) -> Self {
        Self {
            key: keygen::record_key(),
            start_time: now,
            end_time: now,
            modified_time: now,
            description: description.to_string(),
            server_time: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.end_time == self.start_time
    }

    pub fn is_hidden(&self) -> bool {
        self.description.starts_with(HIDDEN_PREFIX)
    }

    /// Elapsed seconds; running records are measured against `now`.
    pub fn duration_secs(&self, now: i64) -> i64 {
        if self.is_running() {
            now - self.start_time
        } else {
            self.end_time - self.start_time
        }
    }

    /// Copy with the end timestamp closed at `now`.
    pub fn stopped(&self, now: i64) -> Self {
        Self {
            end_time: now,
            modified_time: now,
            ..self.clone()
        }
    }

    /// Copy with description and time range replaced.
    pub fn edited(&self, description: &str, start: i64, end: i64, now: i64) -> Self {
        Self {
            description: description.to_string(),
            start_time: start,
            end_time: end,
            modified_time: now,
            ..self.clone()
        }
    }

    /// Copy marked as deleted: the description gains the hidden prefix.
    pub fn tombstoned(&self, now: i64) -> Self {
        Self {
            description: format!("{}{}", HIDDEN_PREFIX, self.description),
            modified_time: now,
            ..self.clone()
        }
    }
}
