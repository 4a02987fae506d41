//! Stock detail view: header, health gauge and price chart.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
};
use rust_decimal::prelude::ToPrimitive;

use super::NewsList;
use crate::state::{DetailState, StockDetail, ViewPhase};
use crate::ui::theme;

/// Full-page detail for the open ticker.
pub struct DetailView;

impl DetailView {
    pub fn render(frame: &mut Frame, area: Rect, detail: &DetailState) {
        let ticker = detail.ticker.as_deref().unwrap_or_default();

        let record = match (&detail.phase, detail.visible()) {
            (ViewPhase::Ready, Some(record)) => record,
            (ViewPhase::Failed(message), _) => {
                Self::render_message(frame, area, ticker, message, Color::Red);
                return;
            }
            _ => {
                let message = format!("Loading {ticker}...");
                Self::render_message(frame, area, ticker, &message, Color::Yellow);
                return;
            }
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(10),
            ])
            .split(area);

        Self::render_header(frame, chunks[0], record);
        Self::render_gauge(frame, chunks[1], record);
        Self::render_chart(frame, chunks[2], record);
        NewsList::render(frame, chunks[3], &record.news);
    }

    fn render_message(frame: &mut Frame, area: Rect, ticker: &str, message: &str, color: Color) {
        let paragraph = Paragraph::new(Span::styled(
            message.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" {ticker} "))
                .borders(Borders::ALL),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_header(frame: &mut Frame, area: Rect, record: &StockDetail) {
        let stock = &record.summary;
        let tier = record.tier();
        let price = stock
            .current_price
            .map(|p| format!("₹{p:.2}"))
            .unwrap_or_else(|| "No price data".to_string());

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    stock.ticker.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(stock.company_name.clone()),
                Span::raw("  "),
                Span::styled(format!(" {} ", stock.health_badge), theme::badge_style(tier)),
            ]),
            Line::from(vec![
                Span::styled(price, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(stock.sector.clone().unwrap_or_default(), theme::muted()),
            ]),
        ];

        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::tier_style(tier)),
        );
        frame.render_widget(header, area);
    }

    fn render_gauge(frame: &mut Frame, area: Rect, record: &StockDetail) {
        let score = record.summary.health_score.min(100);
        let gauge = Gauge::default()
            .block(Block::default().title(" Health Score ").borders(Borders::ALL))
            .gauge_style(theme::tier_style(record.tier()))
            .percent(u16::from(score))
            .label(format!("{score} / 100"));
        frame.render_widget(gauge, area);
    }

    fn render_chart(frame: &mut Frame, area: Rect, record: &StockDetail) {
        let points = chart_points(record);
        let block = Block::default().title(" Price History ").borders(Borders::ALL);

        if points.is_empty() {
            let empty = Paragraph::new(Span::styled("No price history", theme::muted()))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let prices = record.chronological_prices();
        let (min, max) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), (_, y)| {
            (lo.min(*y), hi.max(*y))
        });
        let pad = ((max - min) * 0.05).max(1.0);
        let first = prices.first().map(|p| p.date.to_string()).unwrap_or_default();
        let last = prices.last().map(|p| p.date.to_string()).unwrap_or_default();

        let dataset = Dataset::default()
            .name(record.summary.ticker.clone())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme::tier_style(record.tier()))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(theme::muted())
                    .bounds([0.0, (points.len().max(2) - 1) as f64])
                    .labels(vec![first, last]),
            )
            .y_axis(
                Axis::default()
                    .style(theme::muted())
                    .bounds([min - pad, max + pad])
                    .labels(vec![format!("{:.0}", min - pad), format!("{:.0}", max + pad)]),
            );
        frame.render_widget(chart, area);
    }
}

/// Close prices as `(index, price)`, oldest first.
pub fn chart_points(record: &StockDetail) -> Vec<(f64, f64)> {
    record
        .chronological_prices()
        .into_iter()
        .filter_map(|p| p.close_price.to_f64())
        .enumerate()
        .map(|(i, close)| (i as f64, close))
        .collect()
}
