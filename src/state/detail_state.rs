//! Single-stock detail state.

use super::phase::{ApplyOutcome, ViewPhase};
use super::stock::{HealthTier, StockDetail};
use crate::sync::{FetchMode, Seq, SequenceGate};
use chrono::{DateTime, Utc};

/// Shown when the first fetch for a ticker fails.
pub const DETAIL_LOAD_ERROR: &str = "Stock not found";

/// State for the detail view of one ticker.
#[derive(Debug, Default)]
pub struct DetailState {
    /// Ticker being shown, if the detail view is open.
    pub ticker: Option<String>,
    pub phase: ViewPhase,
    /// The whole record from one response; never merged field by field.
    pub record: Option<StockDetail>,
    pub last_updated: Option<DateTime<Utc>>,
    mounted: bool,
    gate: SequenceGate,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `ticker`, discarding whatever was shown before.
    pub fn open(&mut self, ticker: impl Into<String>) -> bool {
        let ticker = ticker.into();
        if self.ticker.as_deref() == Some(ticker.as_str()) {
            return false;
        }
        self.ticker = Some(ticker);
        self.record = None;
        self.last_updated = None;
        self.phase = ViewPhase::Loading;
        true
    }

    /// Forget the ticker. Completions still in flight are dropped.
    pub fn close(&mut self) {
        self.ticker = None;
        self.record = None;
        self.phase = ViewPhase::Loading;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount(&mut self, floor: Seq) {
        self.mounted = true;
        self.phase = ViewPhase::Loading;
        self.gate.raise_floor(floor);
    }

    pub fn unmount(&mut self, floor: Seq) {
        self.mounted = false;
        self.gate.raise_floor(floor);
    }

    /// Theme for the current snapshot.
    pub fn tier(&self) -> Option<HealthTier> {
        self.visible().map(StockDetail::tier)
    }

    /// The record to render; `None` unless the view is `Ready`.
    pub fn visible(&self) -> Option<&StockDetail> {
        if self.phase.is_ready() {
            self.record.as_ref()
        } else {
            None
        }
    }

    /// Apply a detail fetch completion for `ticker`.
    pub fn apply(
        &mut self,
        ticker: &str,
        seq: Seq,
        mode: FetchMode,
        result: Result<StockDetail, String>,
    ) -> ApplyOutcome {
        if !self.mounted
            || !self.gate.belongs(seq)
            || self.ticker.as_deref() != Some(ticker)
            || self.phase.error().is_some()
        {
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(detail) => {
                let fresh = self.gate.admit(seq);
                if fresh {
                    self.record = Some(detail);
                    self.last_updated = Some(Utc::now());
                }
                if mode.is_initial() {
                    self.phase = ViewPhase::Ready;
                }
                if fresh || mode.is_initial() {
                    ApplyOutcome::Applied
                } else {
                    ApplyOutcome::Stale
                }
            }
            Err(_) if mode.is_initial() => {
                self.phase = ViewPhase::Failed(DETAIL_LOAD_ERROR.to_string());
                ApplyOutcome::Applied
            }
            Err(e) => ApplyOutcome::Swallowed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::stock::{HealthBadge, NewsItem, PricePoint, StockSummary};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn reliance(score: u8, close: rust_decimal::Decimal) -> StockDetail {
        StockDetail {
            summary: StockSummary {
                ticker: "RELIANCE".to_string(),
                company_name: "Reliance Industries".to_string(),
                sector: Some("Energy".to_string()),
                logo_url: None,
                current_price: Some(close),
                health_score: score,
                health_badge: HealthBadge::from(if score >= 70 { "Strong Buy" } else { "Risky Sell" }),
                sparkline: Vec::new(),
            },
            prices: vec![PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                close_price: close,
                open_price: None,
                volume: None,
            }],
            news: vec![NewsItem {
                headline: format!("Score moves to {score}"),
                published_at: Utc::now(),
                sentiment_score: 0.0,
                url: None,
            }],
        }
    }

    fn mounted(ticker: &str) -> DetailState {
        let mut detail = DetailState::new();
        detail.open(ticker);
        detail.mount(0);
        detail
    }

    #[test]
    fn test_background_poll_flips_theme_atomically() {
        let mut detail = mounted("RELIANCE");

        detail.apply("RELIANCE", 1, FetchMode::Initial, Ok(reliance(45, dec!(2450.50))));
        assert_eq!(detail.tier(), Some(HealthTier::Low));

        detail.apply("RELIANCE", 2, FetchMode::Background, Ok(reliance(72, dec!(2511.00))));
        let shown = detail.visible().unwrap();
        assert_eq!(detail.tier(), Some(HealthTier::High));
        assert_eq!(shown.summary.health_score, 72);
        assert_eq!(shown.summary.health_badge, HealthBadge::StrongBuy);
        assert_eq!(shown.prices[0].close_price, dec!(2511.00));
        assert_eq!(shown.news[0].headline, "Score moves to 72");
    }

    #[test]
    fn test_loading_hides_record() {
        let detail = mounted("RELIANCE");
        assert!(detail.phase.is_loading());
        assert!(detail.visible().is_none());
        assert_eq!(detail.tier(), None);
    }

    #[test]
    fn test_opening_other_ticker_discards_record() {
        let mut detail = mounted("RELIANCE");
        detail.apply("RELIANCE", 1, FetchMode::Initial, Ok(reliance(45, dec!(2450.50))));

        assert!(detail.open("TCS"));
        assert!(detail.record.is_none());
        assert!(detail.phase.is_loading());
        assert!(!detail.open("TCS"));
    }

    #[test]
    fn test_completion_for_previous_ticker_is_dropped() {
        let mut detail = mounted("RELIANCE");
        detail.open("TCS");
        detail.mount(1);

        let outcome = detail.apply("RELIANCE", 2, FetchMode::Background, Ok(reliance(45, dec!(1))));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(detail.record.is_none());
    }

    #[test]
    fn test_initial_failure_shows_not_found() {
        let mut detail = mounted("NOPE");
        detail.apply("NOPE", 1, FetchMode::Initial, Err("HTTP 404".to_string()));
        assert_eq!(detail.phase.error(), Some(DETAIL_LOAD_ERROR));
    }

    #[test]
    fn test_background_failure_keeps_snapshot() {
        let mut detail = mounted("RELIANCE");
        detail.apply("RELIANCE", 1, FetchMode::Initial, Ok(reliance(45, dec!(2450.50))));

        let outcome = detail.apply("RELIANCE", 2, FetchMode::Background, Err("timeout".to_string()));
        assert!(matches!(outcome, ApplyOutcome::Swallowed(_)));
        assert_eq!(detail.visible().unwrap().summary.health_score, 45);
    }

    #[test]
    fn test_unmounted_detail_ignores_completion() {
        let mut detail = mounted("RELIANCE");
        detail.unmount(3);

        let outcome = detail.apply("RELIANCE", 2, FetchMode::Initial, Ok(reliance(45, dec!(1))));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(detail.record.is_none());
    }
}
