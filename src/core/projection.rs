//! Presentation-ready projection of fetched records: a cached snapshot of
//! the active window plus a client-side text filter over it.

use crate::api::client::RecordsApi;
use crate::core::records::RecordStore;
use crate::models::record::Record;
use crate::utils::tags;

/// What the rendering layer consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordsUiState {
    Loading,
    Success(Vec<Record>),
    Error(String),
}

/// The two axes are independent: changing the window triggers a fresh fetch
/// (and the query is re-applied to the new snapshot); changing the query
/// only re-filters the cached snapshot, with no network round trip.
pub struct RecordsView {
    all_records: Vec<Record>,
    query: String,
    window: (i64, i64),
    state: RecordsUiState,
}

impl RecordsView {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            all_records: Vec::new(),
            query: String::new(),
            window: (start, end),
            state: RecordsUiState::Loading,
        }
    }

    pub fn state(&self) -> &RecordsUiState {
        &self.state
    }

    pub fn window(&self) -> (i64, i64) {
        self.window
    }

    /// Re-fetch the active window and re-apply the current query.
    pub async fn refresh<A: RecordsApi>(&mut self, store: &RecordStore<A>) {
        self.state = RecordsUiState::Loading;
        let (start, end) = self.window;
        self.all_records = store.fetch_records(start, end).await;
        self.apply_filter();
    }

    /// Move the window. Takes effect on the next `refresh`.
    pub fn set_window(&mut self, start: i64, end: i64) {
        self.window = (start, end);
    }

    /// Change the free-text filter and re-derive from the cached snapshot.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.apply_filter();
    }

    /// Mutation failures surface here; the snapshot stays untouched.
    pub fn set_error(&mut self, message: &str) {
        self.state = RecordsUiState::Error(message.to_string());
    }

    fn apply_filter(&mut self) {
        if self.query.trim().is_empty() {
            self.state = RecordsUiState::Success(self.all_records.clone());
            return;
        }

        let needle = self.query.to_lowercase();
        let filtered = self
            .all_records
            .iter()
            .filter(|r| r.description.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.state = RecordsUiState::Success(filtered);
    }

    /// Top `limit` tags over the full snapshot (the filter does not apply):
    /// case-folded to lowercase, counted, sorted by count descending with
    /// ties kept in first-encountered order.
    pub fn top_tags(&self, limit: usize) -> Vec<String> {
        let pattern = tags::tag_regex();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for record in &self.all_records {
            for m in pattern.find_iter(&record.description) {
                let tag = m.as_str().to_lowercase();
                match counts.iter_mut().find(|(t, _)| *t == tag) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((tag, 1)),
                }
            }
        }

        // Stable sort keeps insertion order within equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.into_iter().take(limit).map(|(tag, _)| tag).collect()
    }
}
