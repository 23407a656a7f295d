//! Wire types for the TimeTagger REST API.

use serde::Deserialize;
use std::collections::HashMap;

use crate::models::record::Record;

/// Response body of `PUT records`. Only `accepted` matters to us: a
/// mutation succeeded iff its key shows up there.
#[derive(Debug, Clone, Deserialize)]
pub struct PutResponse {
    pub accepted: Vec<String>,
    #[serde(default)]
    pub failed: Vec<String>,
    #[serde(default)]
    pub errors: Option<HashMap<String, String>>,
}

/// Response body of `GET records`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    pub records: Vec<Record>,
}

/// Query parameters of `GET records`. The server selects records whose
/// `[t1, t2]` window intersects `[start, end]` (inclusive, whole seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordsQuery {
    pub start: i64,
    pub end: i64,
    pub running: Option<bool>,
    pub hidden: Option<bool>,
    pub tag: Option<String>,
}

impl RecordsQuery {
    /// Ordinary fetch: visible records in a window.
    pub fn window(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            running: None,
            hidden: Some(false),
            tag: None,
        }
    }

    /// Dedicated filter for in-progress records (zombie detection, `stop`
    /// without a key).
    pub fn running_only(start: i64, end: i64) -> Self {
        Self {
            running: Some(true),
            ..Self::window(start, end)
        }
    }

    /// The literal `timerange` wire value: `"<start>-<end>"`.
    pub fn timerange(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}
