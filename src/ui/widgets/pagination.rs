//! Pagination footer.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::ListState;

/// "Previous / Page x of y / Next" footer under the stock list.
pub struct Pagination;

impl Pagination {
    pub fn render(frame: &mut Frame, area: Rect, list: &ListState) {
        frame.render_widget(
            Paragraph::new(Self::line(list)).alignment(Alignment::Center),
            area,
        );
    }

    pub fn line(list: &ListState) -> Line<'static> {
        let button = |label: &'static str, enabled: bool| {
            let style = if enabled {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(label, style)
        };

        Line::from(vec![
            button("◀ Previous (p)", list.can_go_previous()),
            Span::raw(format!("   Page {} of {}   ", list.page, list.total_pages())),
            button("Next (n) ▶", list.can_go_next()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PageResult;
    use crate::sync::FetchMode;

    #[test]
    fn test_footer_dims_missing_cursor() {
        let mut list = ListState::new(20);
        list.mount(0);
        list.apply(
            1,
            FetchMode::Initial,
            Ok(PageResult {
                count: 45,
                next: Some("page=2".to_string()),
                previous: None,
                results: Vec::new(),
            }),
        );

        let line = Pagination::line(&list);
        assert_eq!(line.spans[1].content, "   Page 1 of 3   ");
        assert_eq!(line.spans[0].style.fg, Some(Color::DarkGray));
        assert_eq!(line.spans[2].style.fg, Some(Color::Cyan));
    }
}
