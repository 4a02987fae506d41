//! Stock records as served by the backend.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Score at or above which a stock is considered strong.
pub const HIGH_HEALTH_THRESHOLD: u8 = 70;
/// Score at or above which a stock is considered healthy.
pub const HEALTHY_THRESHOLD: u8 = 50;

/// Sentiment above this is positive, below its negation negative.
pub const SENTIMENT_THRESHOLD: f64 = 0.2;

/// Backend recommendation label attached to a health score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthBadge {
    StrongBuy,
    #[default]
    Hold,
    RiskySell,
    Other(String),
}

impl HealthBadge {
    pub fn as_str(&self) -> &str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Hold => "Hold",
            Self::RiskySell => "Risky Sell",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for HealthBadge {
    fn from(label: &str) -> Self {
        match label {
            "Strong Buy" => Self::StrongBuy,
            "Hold" => Self::Hold,
            "Risky Sell" => Self::RiskySell,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for HealthBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HealthBadge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HealthBadge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from(label.as_str()))
    }
}

/// Visual theme derived from a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    High,
    Medium,
    Low,
}

impl HealthTier {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_HEALTH_THRESHOLD {
            Self::High
        } else if score >= HEALTHY_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A single daily close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close_price: Decimal,
    #[serde(default)]
    pub open_price: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<i64>,
}

/// One row of the stock list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    /// Unique key.
    pub ticker: String,
    pub company_name: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Latest close; absent when the backend holds no prices yet.
    #[serde(default)]
    pub current_price: Option<Decimal>,
    pub health_score: u8,
    #[serde(default)]
    pub health_badge: HealthBadge,
    /// Last few closes, oldest first.
    #[serde(default)]
    pub sparkline: Vec<PricePoint>,
}

impl StockSummary {
    pub fn tier(&self) -> HealthTier {
        HealthTier::from_score(self.health_score)
    }

    /// Two-way split used by summary cards.
    pub fn is_healthy(&self) -> bool {
        self.health_score >= HEALTHY_THRESHOLD
    }

    /// Sparkline closes scaled for integer sparkline rendering.
    pub fn sparkline_values(&self) -> Vec<u64> {
        scale_closes(self.sparkline.iter().map(|p| p.close_price))
    }
}

/// A news headline with its sentiment score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub published_at: DateTime<Utc>,
    /// In `[-1, 1]`.
    pub sentiment_score: f64,
    #[serde(default)]
    pub url: Option<String>,
}

/// Sentiment classification of a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl NewsItem {
    pub fn sentiment(&self) -> Sentiment {
        if self.sentiment_score > SENTIMENT_THRESHOLD {
            Sentiment::Positive
        } else if self.sentiment_score < -SENTIMENT_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

/// Full record for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    #[serde(flatten)]
    pub summary: StockSummary,
    /// Newest first, as served.
    #[serde(default)]
    pub prices: Vec<PricePoint>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

impl StockDetail {
    pub fn tier(&self) -> HealthTier {
        self.summary.tier()
    }

    /// Prices oldest first, ready for charting.
    pub fn chronological_prices(&self) -> Vec<&PricePoint> {
        let mut prices: Vec<&PricePoint> = self.prices.iter().collect();
        prices.sort_by_key(|p| p.date);
        prices
    }
}

/// One page of the stock list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PageResult {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<StockSummary>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageWire {
    Paginated {
        count: usize,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<StockSummary>,
    },
    Bare(Vec<StockSummary>),
}

impl<'de> Deserialize<'de> for PageResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // A backend with pagination disabled answers with a bare array.
        Ok(match PageWire::deserialize(deserializer)? {
            PageWire::Paginated {
                count,
                next,
                previous,
                results,
            } => Self {
                count,
                next,
                previous,
                results,
            },
            PageWire::Bare(results) => Self {
                count: results.len(),
                next: None,
                previous: None,
                results,
            },
        })
    }
}

impl PageResult {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total pages for the given page size, never less than one.
    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 1;
        }
        self.count.div_ceil(page_size).max(1)
    }
}

/// Scale decimal closes into non-negative integers, preserving shape.
fn scale_closes(closes: impl Iterator<Item = Decimal>) -> Vec<u64> {
    let closes: Vec<Decimal> = closes.collect();
    let Some(min) = closes.iter().min().copied() else {
        return Vec::new();
    };

    closes
        .iter()
        .map(|c| {
            let scaled = (*c - min) * Decimal::ONE_HUNDRED;
            scaled.trunc().to_u64().unwrap_or(0) + 1
        })
        .collect()
}
