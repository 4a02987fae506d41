//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{InputMode, Store, View};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let connection_status = if store.app.connected {
            Span::styled("● Connected", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Offline", Style::default().fg(Color::Red))
        };

        let mode = match store.app.input_mode {
            InputMode::Normal => "NORMAL",
            InputMode::Search => "SEARCH",
            InputMode::Filter => "FILTER",
        };
        let mode = Span::styled(format!(" {mode} "), Style::default().fg(Color::Yellow));

        let (loading, updated) = match store.app.current_view {
            View::Dashboard => (store.list.phase.is_loading(), store.list.last_updated),
            View::StockDetail => (store.detail.phase.is_loading(), store.detail.last_updated),
        };

        let activity = if loading {
            Span::styled(
                " Loading... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if let Some(at) = updated {
            Span::raw(format!(" Updated {} ", at.format("%H:%M:%S")))
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        let left_content = vec![
            Span::styled(
                " MarketSentry ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            connection_status,
            Span::raw(" | "),
            mode,
            activity,
        ];

        // Right-align the help hint
        let left_len: usize = left_content.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_len + help_hint.width());

        let mut full_line = left_content;
        full_line.push(Span::raw(" ".repeat(padding)));
        full_line.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(full_line)).style(Style::default().bg(Color::DarkGray));

        frame.render_widget(paragraph, area);
    }
}
