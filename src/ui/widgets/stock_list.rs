//! Stock list widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::state::{InputMode, Store, StockSummary, ViewPhase};
use crate::ui::theme;

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Stock list widget.
pub struct StockList;

impl StockList {
    /// Render the stock list.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let list = &store.list;
        let block = Block::default()
            .title(Self::title(store))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        match &list.phase {
            ViewPhase::Loading => {
                let loading = Paragraph::new(Span::styled(
                    "Loading...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .block(block);
                frame.render_widget(loading, area);
                return;
            }
            ViewPhase::Failed(message) => {
                let error = Paragraph::new(Span::styled(
                    message.as_str(),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
                frame.render_widget(error, area);
                return;
            }
            ViewPhase::Ready => {}
        }

        let stocks = list.visible();
        if stocks.is_empty() {
            let hint = if list.search_term.is_empty() {
                "No stocks found.".to_string()
            } else {
                format!("No stocks found matching \"{}\"", list.search_term)
            };
            let empty = Paragraph::new(Span::styled(hint, theme::muted()))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header_cells = ["Ticker", "Company", "Sector", "Price", "Trend", "Health", "Signal"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style()));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        let rows = stocks.iter().map(stock_row);

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Percentage(30),
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(12),
                Constraint::Length(7),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(list.selected_index);

        frame.render_stateful_widget(table, area, &mut state);
    }

    fn title(store: &Store) -> Line<'static> {
        let list = &store.list;
        let mut spans = vec![Span::raw(" Stocks ")];
        if let Some(page) = &list.page_result {
            spans.push(Span::raw(format!("({}) ", page.count)));
        }

        let editing = store.app.input_mode == InputMode::Filter;
        if editing || !list.search_term.is_empty() {
            let cursor = if editing { "█" } else { "" };
            spans.push(Span::styled(
                format!("· filter: {}{cursor} ", list.search_term),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }
}

fn stock_row(stock: &StockSummary) -> Row<'_> {
    let tier = stock.tier();
    let price = stock
        .current_price
        .map(|p| format!("₹{p:.2}"))
        .unwrap_or_else(|| "-".to_string());

    Row::new(vec![
        Cell::from(stock.ticker.as_str()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(truncate(&stock.company_name, 32)),
        Cell::from(stock.sector.as_deref().unwrap_or("-")).style(theme::muted()),
        Cell::from(price),
        Cell::from(sparkline_text(&stock.sparkline_values())).style(theme::tier_style(tier)),
        Cell::from(stock.health_score.to_string()).style(theme::tier_style(tier)),
        Cell::from(stock.health_badge.as_str().to_string()).style(theme::tier_style(tier)),
    ])
    .height(1)
}

/// Render integer sparkline values as block characters.
pub fn sparkline_text(values: &[u64]) -> String {
    let Some(&max) = values.iter().max() else {
        return String::new();
    };
    let min = values.iter().min().copied().unwrap_or(max);
    let span = (max - min).max(1);

    values
        .iter()
        .map(|v| {
            let idx = ((v - min) * (SPARK_BARS.len() as u64 - 1)) / span;
            SPARK_BARS[idx as usize]
        })
        .collect()
}

/// Shorten `s` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_text_spans_full_range() {
        assert_eq!(sparkline_text(&[1, 5, 8]), "▁▅█");
        assert_eq!(sparkline_text(&[3, 3]), "▁▁");
        assert_eq!(sparkline_text(&[]), "");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("Reliance Industries", 8), "Relianc…");
        assert_eq!(truncate("TCS", 8), "TCS");
        assert_eq!(truncate("₹₹₹₹", 3), "₹₹…");
    }
}
