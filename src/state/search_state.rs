//! Quick search box with a results dropdown.

use super::phase::ApplyOutcome;
use super::stock::StockSummary;
use crate::sync::{Seq, SequenceGate};

/// State for the debounced quick search.
#[derive(Debug)]
pub struct SearchState {
    /// Text typed into the box.
    pub query: String,
    /// Results of the newest lookup for `query`.
    pub results: Vec<StockSummary>,
    /// Whether the dropdown is shown.
    pub open: bool,
    /// Whether a lookup for `query` is in flight.
    pub loading: bool,
    /// Highlighted dropdown row.
    pub highlighted: usize,
    min_query_len: usize,
    latest_started: Seq,
    gate: SequenceGate,
}

impl SearchState {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            open: false,
            loading: false,
            highlighted: 0,
            min_query_len,
            latest_started: 0,
            gate: SequenceGate::new(),
        }
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Whether `query` is long enough to reach the network.
    pub fn is_searchable(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_len
    }

    /// Replace the query. Short queries clear results on the spot.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.loading = false;
        if !self.is_searchable(&self.query) {
            self.results.clear();
            self.highlighted = 0;
        }
    }

    pub fn push_char(&mut self, c: char) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_char(&mut self) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query);
    }

    /// Focusing the box reopens the dropdown for a searchable query.
    pub fn focus(&mut self) {
        if self.is_searchable(&self.query) {
            self.open = true;
        }
    }

    /// Close the dropdown, keeping the query.
    pub fn dismiss(&mut self) {
        self.open = false;
    }

    /// Take the highlighted result, clearing the query and dropdown.
    pub fn select(&mut self) -> Option<String> {
        if !self.open {
            return None;
        }
        let ticker = self.results.get(self.highlighted)?.ticker.clone();
        self.set_query(String::new());
        self.open = false;
        Some(ticker)
    }

    pub fn move_highlight(&mut self, delta: i32) {
        if self.results.is_empty() {
            self.highlighted = 0;
            return;
        }
        let current = self.highlighted as i32;
        let max = self.results.len() as i32 - 1;
        self.highlighted = (current + delta).clamp(0, max) as usize;
    }

    /// Whether the "No results found." hint applies.
    pub fn shows_empty_hint(&self) -> bool {
        self.open && self.is_searchable(&self.query) && self.results.is_empty() && !self.loading
    }

    /// Reject lookups issued up to `floor`. Called when the query is cleared.
    pub fn reset_floor(&mut self, floor: Seq) {
        self.gate.raise_floor(floor);
        self.loading = false;
    }

    /// A lookup for `query` went out with token `seq`.
    pub fn started(&mut self, seq: Seq, query: &str) {
        if query == self.query {
            self.loading = true;
            self.latest_started = self.latest_started.max(seq);
        }
    }

    /// Apply a lookup result. Results for any query but the current one are dropped.
    pub fn apply(
        &mut self,
        seq: Seq,
        query: &str,
        result: Result<Vec<StockSummary>, String>,
    ) -> ApplyOutcome {
        if query != self.query || !self.is_searchable(query) || !self.gate.belongs(seq) {
            return ApplyOutcome::Stale;
        }
        if seq >= self.latest_started {
            self.loading = false;
        }

        match result {
            Ok(results) if self.gate.admit(seq) => {
                self.results = results;
                self.highlighted = 0;
                self.open = true;
                ApplyOutcome::Applied
            }
            Ok(_) => ApplyOutcome::Stale,
            Err(e) => ApplyOutcome::Swallowed(e),
        }
    }
}
