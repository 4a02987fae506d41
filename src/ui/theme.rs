//! Colours keyed off health tiers and headline sentiment.

use crate::state::{HealthTier, Sentiment};
use ratatui::style::{Color, Modifier, Style};

pub fn tier_color(tier: HealthTier) -> Color {
    match tier {
        HealthTier::High => Color::Green,
        HealthTier::Medium => Color::Yellow,
        HealthTier::Low => Color::Red,
    }
}

pub fn tier_style(tier: HealthTier) -> Style {
    Style::default().fg(tier_color(tier))
}

/// Badge text drawn on a tier-coloured background.
pub fn badge_style(tier: HealthTier) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(tier_color(tier))
        .add_modifier(Modifier::BOLD)
}

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Neutral => Color::Gray,
        Sentiment::Negative => Color::Red,
    }
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(Color::DarkGray)
}
