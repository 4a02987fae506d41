//! Paginated stock list state.

use super::phase::{ApplyOutcome, ViewPhase};
use super::stock::{PageResult, StockSummary};
use crate::sync::{FetchMode, Seq, SequenceGate};
use chrono::{DateTime, Utc};

/// Shown when the first page for a parameter set cannot be fetched.
pub const LIST_LOAD_ERROR: &str = "Failed to load market data. Ensure backend is running.";

/// The inputs a list fetch depends on. A change means a fresh initial fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: usize,
    pub search_term: String,
}

/// State for the stock list on the dashboard.
#[derive(Debug)]
pub struct ListState {
    /// 1-based page index.
    pub page: usize,
    /// Backend-side filter on ticker and company name.
    pub search_term: String,
    /// Load phase for the current page and search term.
    pub phase: ViewPhase,
    /// Last page received; kept through background failures.
    pub page_result: Option<PageResult>,
    /// Currently highlighted row.
    pub selected_index: Option<usize>,
    /// Last successful refresh.
    pub last_updated: Option<DateTime<Utc>>,
    page_size: usize,
    mounted: bool,
    gate: SequenceGate,
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            search_term: String::new(),
            phase: ViewPhase::Loading,
            page_result: None,
            selected_index: None,
            last_updated: None,
            page_size,
            mounted: false,
            gate: SequenceGate::new(),
        }
    }

    pub fn params(&self) -> ListParams {
        ListParams {
            page: self.page,
            search_term: self.search_term.clone(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Enter `Loading` for a fresh poller whose tokens all exceed `floor`.
    pub fn mount(&mut self, floor: Seq) {
        self.mounted = true;
        self.phase = ViewPhase::Loading;
        self.gate.raise_floor(floor);
    }

    /// Stop accepting completions issued up to `floor`.
    pub fn unmount(&mut self, floor: Seq) {
        self.mounted = false;
        self.gate.raise_floor(floor);
    }

    /// Replace the search term, going back to the first page.
    ///
    /// Both fields change in the same step so a filtered query is never
    /// issued against a page index from the unfiltered set.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        self.page = 1;
        self.selected_index = None;
        self.phase = ViewPhase::Loading;
        true
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        self.selected_index = None;
        self.phase = ViewPhase::Loading;
        true
    }

    pub fn can_go_next(&self) -> bool {
        self.phase.is_ready() && self.page_result.as_ref().is_some_and(PageResult::has_next)
    }

    pub fn can_go_previous(&self) -> bool {
        self.phase.is_ready()
            && self.page > 1
            && self.page_result.as_ref().is_some_and(PageResult::has_previous)
    }

    /// Advance one page if the backend reported a next cursor.
    pub fn next_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.set_page(self.page + 1)
    }

    /// Go back one page if the backend reported a previous cursor.
    pub fn previous_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.set_page(self.page - 1)
    }

    pub fn total_pages(&self) -> usize {
        self.page_result
            .as_ref()
            .map(|p| p.total_pages(self.page_size))
            .unwrap_or(1)
    }

    /// Rows to render; empty unless the view is `Ready`.
    pub fn visible(&self) -> &[StockSummary] {
        match (&self.phase, &self.page_result) {
            (ViewPhase::Ready, Some(page)) => &page.results,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<&StockSummary> {
        self.selected_index.and_then(|i| self.visible().get(i))
    }

    /// Move the highlight by `delta` rows, clamped to the page.
    pub fn scroll(&mut self, delta: i32) {
        let len = self.visible().len();
        if len == 0 {
            self.selected_index = None;
            return;
        }
        let current = self.selected_index.unwrap_or(0) as i32;
        let new_index = (current + delta).max(0) as usize;
        self.selected_index = Some(new_index.min(len - 1));
    }

    /// Apply a list fetch completion.
    pub fn apply(&mut self, seq: Seq, mode: FetchMode, result: Result<PageResult, String>) -> ApplyOutcome {
        if !self.mounted || !self.gate.belongs(seq) {
            return ApplyOutcome::Stale;
        }
        if self.phase.error().is_some() {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let fresh = self.gate.admit(seq);
                if fresh {
                    self.page_result = Some(page);
                    self.last_updated = Some(Utc::now());
                }
                if mode.is_initial() {
                    self.phase = ViewPhase::Ready;
                }
                if !(fresh || mode.is_initial()) {
                    return ApplyOutcome::Stale;
                }
                self.clamp_selection();
                ApplyOutcome::Applied
            }
            Err(e) if mode.is_initial() => {
                self.phase = ViewPhase::Failed(LIST_LOAD_ERROR.to_string());
                tracing::debug!(error = %e, "initial list fetch failed");
                ApplyOutcome::Applied
            }
            Err(e) => ApplyOutcome::Swallowed(e),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected_index = match self.selected_index {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::stock::HealthBadge;
    use pretty_assertions::assert_eq;

    fn summary(ticker: &str, score: u8) -> StockSummary {
        StockSummary {
            ticker: ticker.to_string(),
            company_name: format!("{ticker} Ltd"),
            sector: None,
            logo_url: None,
            current_price: None,
            health_score: score,
            health_badge: HealthBadge::Hold,
            sparkline: Vec::new(),
        }
    }

    fn page(tickers: &[&str], next: bool, previous: bool) -> PageResult {
        PageResult {
            count: 45,
            next: next.then(|| "http://127.0.0.1:8000/api/stocks/?page=3".to_string()),
            previous: previous.then(|| "http://127.0.0.1:8000/api/stocks/?page=1".to_string()),
            results: tickers.iter().map(|t| summary(t, 60)).collect(),
        }
    }

    fn ready_list() -> ListState {
        let mut list = ListState::new(20);
        list.mount(0);
        list.apply(1, FetchMode::Initial, Ok(page(&["TCS", "INFY"], true, false)));
        list
    }

    #[test]
    fn test_search_change_resets_page_in_same_step() {
        let mut list = ready_list();
        assert!(list.next_page());
        assert!(list.set_page(3));

        assert!(list.set_search_term("REL"));
        assert_eq!(list.params(), ListParams { page: 1, search_term: "REL".to_string() });
        assert!(list.phase.is_loading());
    }

    #[test]
    fn test_same_search_term_is_not_a_change() {
        let mut list = ready_list();
        list.set_page(2);
        assert!(!list.set_search_term(""));
        assert_eq!(list.page, 2);
    }

    #[test]
    fn test_next_disabled_without_cursor() {
        let mut list = ListState::new(20);
        list.mount(0);
        list.apply(1, FetchMode::Initial, Ok(page(&["TCS"], false, false)));

        assert!(!list.can_go_next());
        assert!(!list.next_page());
        assert_eq!(list.page, 1);
    }

    #[test]
    fn test_previous_disabled_without_cursor() {
        let mut list = ready_list();
        list.set_page(2);
        list.mount(1);
        list.apply(2, FetchMode::Initial, Ok(page(&["WIPRO"], true, false)));

        assert!(!list.can_go_previous());
        assert!(!list.previous_page());
        assert_eq!(list.page, 2);
    }

    #[test]
    fn test_pagination_follows_cursors() {
        let mut list = ready_list();
        assert!(list.can_go_next());
        assert!(!list.can_go_previous());

        assert!(list.next_page());
        list.mount(1);
        list.apply(2, FetchMode::Initial, Ok(page(&["WIPRO"], true, true)));

        assert_eq!(list.page, 2);
        assert!(list.can_go_previous());
        assert!(list.previous_page());
        assert_eq!(list.page, 1);
    }

    #[test]
    fn test_background_failure_keeps_data_and_phase() {
        let mut list = ready_list();

        let outcome = list.apply(2, FetchMode::Background, Err("timeout".to_string()));

        assert_eq!(outcome, ApplyOutcome::Swallowed("timeout".to_string()));
        assert!(list.phase.is_ready());
        assert_eq!(list.phase.error(), None);
        assert_eq!(list.visible().len(), 2);
    }

    #[test]
    fn test_initial_failure_is_terminal_for_params() {
        let mut list = ListState::new(20);
        list.mount(0);

        list.apply(1, FetchMode::Initial, Err("connection refused".to_string()));
        assert_eq!(list.phase.error(), Some(LIST_LOAD_ERROR));

        let outcome = list.apply(2, FetchMode::Background, Ok(page(&["TCS"], false, false)));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(list.visible().is_empty());

        list.set_search_term("TC");
        list.mount(2);
        list.apply(3, FetchMode::Initial, Ok(page(&["TCS"], false, false)));
        assert!(list.phase.is_ready());
    }

    #[test]
    fn test_out_of_order_background_is_discarded() {
        let mut list = ready_list();

        list.apply(3, FetchMode::Background, Ok(page(&["NEWER"], true, false)));
        let outcome = list.apply(2, FetchMode::Background, Ok(page(&["OLDER"], true, false)));

        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(list.visible()[0].ticker, "NEWER");
    }

    #[test]
    fn test_late_initial_resolves_loading_without_clobbering() {
        let mut list = ListState::new(20);
        list.mount(0);

        list.apply(2, FetchMode::Background, Ok(page(&["NEWER"], false, false)));
        assert!(list.phase.is_loading());

        list.apply(1, FetchMode::Initial, Ok(page(&["OLDER"], false, false)));
        assert!(list.phase.is_ready());
        assert_eq!(list.visible()[0].ticker, "NEWER");
    }

    #[test]
    fn test_unmount_blocks_later_completions() {
        let mut list = ready_list();
        list.unmount(5);

        let outcome = list.apply(4, FetchMode::Background, Ok(page(&["LATE"], false, false)));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert_eq!(list.page_result.as_ref().unwrap().results[0].ticker, "TCS");
    }

    #[test]
    fn test_completion_from_previous_mount_is_dropped() {
        let mut list = ready_list();
        list.set_page(2);
        list.mount(7);

        let outcome = list.apply(6, FetchMode::Initial, Ok(page(&["PAGE1"], true, false)));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(list.phase.is_loading());
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut list = ready_list();
        assert_eq!(list.selected_index, Some(0));
        list.scroll(10);
        assert_eq!(list.selected().unwrap().ticker, "INFY");
        list.scroll(-10);
        assert_eq!(list.selected_index, Some(0));
    }
}
