//! Quick search input and results dropdown.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::state::{InputMode, Store};
use crate::ui::layout::Layout;
use crate::ui::theme;

/// Search box with its dropdown.
pub struct SearchBox;

impl SearchBox {
    /// Render the input line.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let focused = store.app.input_mode == InputMode::Search;
        let search = &store.search;

        let content = if search.query.is_empty() && !focused {
            Line::from(Span::styled("Search ticker or company (/)", theme::muted()))
        } else {
            let mut spans = vec![Span::raw(search.query.clone())];
            if focused {
                spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
            }
            if search.loading {
                spans.push(Span::styled("  searching...", theme::muted()));
            }
            Line::from(spans)
        };

        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let paragraph = Paragraph::new(content).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);
    }

    /// Render the dropdown over the main area. Returns where it was drawn.
    pub fn render_dropdown(frame: &mut Frame, layout: &Layout, store: &Store) -> Option<Rect> {
        let search = &store.search;
        if !search.open || !search.is_searchable(&search.query) {
            return None;
        }

        let area = layout.dropdown_area(search.results.len());
        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if search.shows_empty_hint() {
            let hint = Paragraph::new(Span::styled("No results found.", theme::muted())).block(block);
            frame.render_widget(hint, area);
            return Some(area);
        }

        let items: Vec<ListItem> = search
            .results
            .iter()
            .map(|stock| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<12}", stock.ticker),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(super::stock_list::truncate(&stock.company_name, 30)),
                    Span::raw("  "),
                    Span::styled(stock.health_score.to_string(), theme::tier_style(stock.tier())),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(search.highlighted));

        frame.render_stateful_widget(list, area, &mut state);
        Some(area)
    }
}
