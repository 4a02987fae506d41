//! State management for MarketSentry.
//!
//! This module provides centralized state management with a unidirectional
//! data flow: user input and fetch completions become [`Action`]s, and
//! [`Store::reduce`] is the only place state changes.

mod app_state;
mod detail_state;
mod list_state;
mod movers_state;
mod phase;
mod search_state;
mod stock;

pub use app_state::{AppState, InputMode, View};
pub use detail_state::{DETAIL_LOAD_ERROR, DetailState};
pub use list_state::{LIST_LOAD_ERROR, ListParams, ListState};
pub use movers_state::{MoverSide, MoversState};
pub use phase::{ApplyOutcome, ViewPhase};
pub use search_state::SearchState;
pub use stock::{
    HealthBadge, HealthTier, NewsItem, PageResult, PricePoint, Sentiment, StockDetail,
    StockSummary,
};

use crate::config::SyncConfig;
use crate::sync::{FetchMode, Seq};
use chrono::{DateTime, Utc};

/// A fetch result as carried by an action; errors are pre-rendered messages.
pub type Fetched<T> = std::result::Result<T, String>;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    SetInputMode(InputMode),
    OpenStock(String),
    OpenSelectedStock,
    Back,

    // Stock list
    NextPage,
    PreviousPage,
    SetSearchTerm(String),
    FilterPush(char),
    FilterPop,
    ListMounted(Seq),
    ListUnmounted(Seq),
    StocksLoaded {
        seq: Seq,
        mode: FetchMode,
        result: Fetched<PageResult>,
    },

    // Top movers
    MoversMounted(Seq),
    MoversUnmounted(Seq),
    MoversLoaded {
        side: MoverSide,
        seq: Seq,
        result: Fetched<Vec<StockSummary>>,
    },

    // Stock detail
    DetailMounted(Seq),
    DetailUnmounted(Seq),
    DetailLoaded {
        ticker: String,
        seq: Seq,
        mode: FetchMode,
        result: Fetched<StockDetail>,
    },

    // Quick search
    FocusSearch,
    SearchPush(char),
    SearchPop,
    DismissSearch,
    SelectSearchResult,
    SearchCleared(Seq),
    SearchStarted {
        seq: Seq,
        query: String,
    },
    SearchResultsLoaded {
        seq: Seq,
        query: String,
        result: Fetched<Vec<StockSummary>>,
    },

    // UI actions
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,

    // Quit
    Quit,
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: DateTime<Utc>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 10)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.created_at).num_seconds() >= self.duration_secs as i64
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Paginated stock list.
    pub list: ListState,
    /// Top movers panels.
    pub movers: MoversState,
    /// Stock detail.
    pub detail: DetailState,
    /// Quick search box.
    pub search: SearchState,
}

impl Store {
    /// Create a new store.
    pub fn new(sync: &SyncConfig) -> Self {
        Self {
            app: AppState::new(),
            list: ListState::new(sync.page_size),
            movers: MoversState::new(),
            detail: DetailState::new(),
            search: SearchState::new(sync.min_query_len),
        }
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(View::StockDetail) if self.detail.ticker.is_none() => {}
            Action::SetView(view) => self.app.current_view = view,
            Action::SetInputMode(mode) => self.set_input_mode(mode),
            Action::OpenStock(ticker) => self.open_stock(ticker),
            Action::OpenSelectedStock => {
                if let Some(ticker) = self.list.selected().map(|s| s.ticker.clone()) {
                    self.open_stock(ticker);
                }
            }
            Action::Back => {
                self.app.current_view = View::Dashboard;
                self.detail.close();
            }

            // Stock list
            Action::NextPage => {
                self.list.next_page();
            }
            Action::PreviousPage => {
                self.list.previous_page();
            }
            Action::SetSearchTerm(term) => {
                self.list.set_search_term(term);
            }
            Action::FilterPush(c) => {
                let mut term = self.list.search_term.clone();
                term.push(c);
                self.list.set_search_term(term);
            }
            Action::FilterPop => {
                let mut term = self.list.search_term.clone();
                term.pop();
                self.list.set_search_term(term);
            }
            Action::ListMounted(floor) => self.list.mount(floor),
            Action::ListUnmounted(floor) => self.list.unmount(floor),
            Action::StocksLoaded { seq, mode, result } => {
                let ok = result.is_ok();
                let outcome = self.list.apply(seq, mode, result);
                self.track_connection("stocks", ok, &outcome);
            }

            // Top movers
            Action::MoversMounted(floor) => self.movers.mount(floor),
            Action::MoversUnmounted(floor) => self.movers.unmount(floor),
            Action::MoversLoaded { side, seq, result } => {
                let ok = result.is_ok();
                let outcome = self.movers.apply(side, seq, result);
                self.track_connection(side.title(), ok, &outcome);
            }

            // Stock detail
            Action::DetailMounted(floor) => self.detail.mount(floor),
            Action::DetailUnmounted(floor) => self.detail.unmount(floor),
            Action::DetailLoaded {
                ticker,
                seq,
                mode,
                result,
            } => {
                let ok = result.is_ok();
                let outcome = self.detail.apply(&ticker, seq, mode, result);
                self.track_connection("detail", ok, &outcome);
            }

            // Quick search
            Action::FocusSearch => self.set_input_mode(InputMode::Search),
            Action::SearchPush(c) => self.search.push_char(c),
            Action::SearchPop => self.search.pop_char(),
            Action::DismissSearch => {
                self.search.dismiss();
                if self.app.input_mode == InputMode::Search {
                    self.app.input_mode = InputMode::Normal;
                }
            }
            Action::SelectSearchResult => {
                if let Some(ticker) = self.search.select() {
                    self.app.input_mode = InputMode::Normal;
                    self.open_stock(ticker);
                }
            }
            Action::SearchCleared(floor) => self.search.reset_floor(floor),
            Action::SearchStarted { seq, query } => self.search.started(seq, &query),
            Action::SearchResultsLoaded { seq, query, result } => {
                let outcome = self.search.apply(seq, &query, result);
                if let ApplyOutcome::Swallowed(e) = &outcome {
                    tracing::warn!(query = %query, error = %e, "search lookup failed");
                }
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::GoToTop => self.scroll(i32::MIN / 2),
            Action::GoToBottom => self.scroll(i32::MAX / 2),
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => {
                self.app.notification = Some(notification);
            }
            Action::DismissNotification => {
                self.app.notification = None;
            }

            // Quit
            Action::Quit => {
                self.app.should_quit = true;
            }
        }
    }

    /// Drop the notification once its display time has passed.
    pub fn expire_notification(&mut self, now: DateTime<Utc>) {
        if self.app.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.app.notification = None;
        }
    }

    /// Whether the movers panels should be shown.
    pub fn shows_movers(&self) -> bool {
        self.list.phase.is_ready() && self.list.search_term.is_empty()
    }

    fn open_stock(&mut self, ticker: String) {
        self.detail.open(ticker);
        self.app.current_view = View::StockDetail;
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.app.input_mode = mode;
        if mode == InputMode::Search {
            self.search.focus();
        }
    }

    fn track_connection(&mut self, source: &str, ok: bool, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Stale => {
                tracing::debug!(source, "discarded stale completion");
                return;
            }
            ApplyOutcome::Swallowed(e) => {
                tracing::warn!(source, error = %e, "background refresh failed; keeping last data");
                if self.app.connected {
                    self.app.notification = Some(Notification::warning(
                        "Backend unreachable; showing last known data",
                    ));
                }
            }
            ApplyOutcome::Applied => {
                if ok && !self.app.connected && self.app.notification.is_some() {
                    self.app.notification = Some(Notification::info("Backend reachable again"));
                }
            }
        }
        self.app.connected = ok;
    }

    fn scroll(&mut self, delta: i32) {
        if self.app.input_mode == InputMode::Search {
            self.search.move_highlight(delta);
            return;
        }
        if self.app.current_view == View::Dashboard {
            self.list.scroll(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> Store {
        Store::new(&SyncConfig::default())
    }

    fn summary(ticker: &str, score: u8) -> StockSummary {
        StockSummary {
            ticker: ticker.to_string(),
            company_name: ticker.to_string(),
            sector: None,
            logo_url: None,
            current_price: None,
            health_score: score,
            health_badge: HealthBadge::Hold,
            sparkline: Vec::new(),
        }
    }

    fn page(tickers: &[&str], next: bool) -> PageResult {
        PageResult {
            count: tickers.len(),
            next: next.then(|| "next".to_string()),
            previous: None,
            results: tickers.iter().map(|t| summary(t, 60)).collect(),
        }
    }

    fn loaded(seq: Seq, mode: FetchMode, result: Fetched<PageResult>) -> Action {
        Action::StocksLoaded { seq, mode, result }
    }

    #[test]
    fn test_filter_edit_resets_page() {
        let mut store = store();
        store.reduce(Action::ListMounted(0));
        store.reduce(loaded(1, FetchMode::Initial, Ok(page(&["TCS"], true))));
        store.reduce(Action::NextPage);
        assert_eq!(store.list.page, 2);

        store.reduce(Action::FilterPush('T'));
        assert_eq!(store.list.page, 1);
        assert_eq!(store.list.search_term, "T");
    }

    #[test]
    fn test_background_failure_never_sets_error() {
        let mut store = store();
        store.reduce(Action::ListMounted(0));
        store.reduce(loaded(1, FetchMode::Initial, Ok(page(&["TCS", "INFY"], false))));

        store.reduce(loaded(2, FetchMode::Background, Err("HTTP 500".to_string())));

        assert_eq!(store.list.phase, ViewPhase::Ready);
        assert_eq!(store.list.visible().len(), 2);
        assert!(!store.app.connected);
        assert!(store.app.notification.is_some());
    }

    #[test]
    fn test_unmounted_list_ignores_late_completion() {
        let mut store = store();
        store.reduce(Action::ListMounted(0));
        store.reduce(loaded(1, FetchMode::Initial, Ok(page(&["TCS"], false))));
        store.reduce(Action::ListUnmounted(2));

        store.reduce(loaded(2, FetchMode::Background, Ok(page(&["LATE"], false))));
        assert_eq!(
            store.list.page_result.as_ref().unwrap().results[0].ticker,
            "TCS"
        );
    }

    #[test]
    fn test_open_selected_stock_navigates() {
        let mut store = store();
        store.reduce(Action::ListMounted(0));
        store.reduce(loaded(1, FetchMode::Initial, Ok(page(&["TCS", "INFY"], false))));
        store.reduce(Action::ScrollDown);
        store.reduce(Action::OpenSelectedStock);

        assert_eq!(store.app.current_view, View::StockDetail);
        assert_eq!(store.detail.ticker.as_deref(), Some("INFY"));

        store.reduce(Action::Back);
        assert_eq!(store.app.current_view, View::Dashboard);
        assert!(store.detail.ticker.is_none());
    }

    #[test]
    fn test_detail_view_requires_ticker() {
        let mut store = store();
        store.reduce(Action::SetView(View::StockDetail));
        assert_eq!(store.app.current_view, View::Dashboard);
    }

    #[test]
    fn test_search_selection_opens_detail_and_clears_box() {
        let mut store = store();
        store.reduce(Action::FocusSearch);
        store.reduce(Action::SearchPush('R'));
        store.reduce(Action::SearchPush('E'));
        store.reduce(Action::SearchStarted {
            seq: 1,
            query: "RE".to_string(),
        });
        store.reduce(Action::SearchResultsLoaded {
            seq: 1,
            query: "RE".to_string(),
            result: Ok(vec![summary("RELIANCE", 45)]),
        });
        assert!(store.search.open);

        store.reduce(Action::SelectSearchResult);

        assert_eq!(store.detail.ticker.as_deref(), Some("RELIANCE"));
        assert_eq!(store.app.current_view, View::StockDetail);
        assert_eq!(store.app.input_mode, InputMode::Normal);
        assert!(store.search.query.is_empty());
        assert!(!store.search.open);
    }

    #[test]
    fn test_scroll_in_search_mode_moves_highlight() {
        let mut store = store();
        store.reduce(Action::FocusSearch);
        store.reduce(Action::SearchPush('I'));
        store.reduce(Action::SearchPush('N'));
        store.reduce(Action::SearchResultsLoaded {
            seq: 1,
            query: "IN".to_string(),
            result: Ok(vec![summary("INFY", 70), summary("INDIGO", 40)]),
        });

        store.reduce(Action::ScrollDown);
        assert_eq!(store.search.highlighted, 1);
        assert_eq!(store.list.selected_index, None);
    }

    #[test]
    fn test_movers_hidden_while_filtering() {
        let mut store = store();
        store.reduce(Action::ListMounted(0));
        store.reduce(loaded(1, FetchMode::Initial, Ok(page(&["TCS"], false))));
        assert!(store.shows_movers());

        store.reduce(Action::SetSearchTerm("TC".to_string()));
        assert!(!store.shows_movers());
    }

    #[test]
    fn test_notification_expires() {
        let mut store = store();
        store.reduce(Action::ShowNotification(Notification::info("hello")));
        store.expire_notification(Utc::now());
        assert!(store.app.notification.is_some());

        store.expire_notification(Utc::now() + chrono::Duration::seconds(4));
        assert!(store.app.notification.is_none());
    }
}
