//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;
use crate::ui::theme;

/// Help panel showing keybindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(Self::lines(keys))
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }

    fn lines(keys: &KeyBindings) -> Vec<Line<'static>> {
        let sections: [(&str, Vec<(String, &str)>); 4] = [
            (
                "Navigation",
                vec![
                    (format!("{}/↓", keys.down), "Move down"),
                    (format!("{}/↑", keys.up), "Move up"),
                    ("Home/End".to_string(), "First/last row"),
                    (keys.select.clone(), "Open stock detail"),
                    (keys.back.clone(), "Back to dashboard"),
                ],
            ),
            (
                "Stock list",
                vec![
                    (format!("{}/→", keys.next_page), "Next page"),
                    (format!("{}/←", keys.prev_page), "Previous page"),
                    (keys.filter.clone(), "Filter list (Enter/Esc to finish)"),
                ],
            ),
            (
                "Search",
                vec![
                    (keys.search.clone(), "Focus quick search"),
                    ("Enter".to_string(), "Open highlighted result"),
                    ("Esc".to_string(), "Close dropdown"),
                ],
            ),
            (
                "General",
                vec![
                    (keys.help.clone(), "Toggle help"),
                    (keys.quit.clone(), "Quit"),
                    ("Ctrl+c".to_string(), "Quit from any mode"),
                ],
            ),
        ];

        let mut lines = Vec::new();
        for (title, entries) in sections {
            lines.push(Line::from(Span::styled(title, theme::header_style())));
            for (key, description) in entries {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<10}"), Style::default().fg(Color::Cyan)),
                    Span::raw(description),
                ]));
            }
            lines.push(Line::from(""));
        }
        lines
    }
}
