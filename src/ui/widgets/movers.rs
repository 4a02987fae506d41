//! Top buyers and sellers panels.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::state::{MoverSide, Store};
use crate::ui::theme;

/// Side-by-side movers panels.
pub struct MoversPanel;

impl MoversPanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for (side, half) in [MoverSide::Buys, MoverSide::Sells].into_iter().zip(halves.iter()) {
            Self::render_side(frame, *half, store, side);
        }
    }

    fn render_side(frame: &mut Frame, area: Rect, store: &Store, side: MoverSide) {
        let border = match side {
            MoverSide::Buys => Color::Green,
            MoverSide::Sells => Color::Red,
        };

        let items: Vec<ListItem> = store
            .movers
            .side(side)
            .iter()
            .map(|stock| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<12}", stock.ticker),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:>3}", stock.health_score),
                        theme::tier_style(stock.tier()),
                    ),
                    Span::raw("  "),
                    Span::styled(stock.health_badge.to_string(), theme::muted()),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title(format!(" {} ", side.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(list, area);
    }
}
