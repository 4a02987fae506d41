//! Headlines with sentiment colouring.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::state::{NewsItem, Sentiment};
use crate::ui::theme;

/// Recent news for a stock.
pub struct NewsList;

impl NewsList {
    pub fn render(frame: &mut Frame, area: Rect, news: &[NewsItem]) {
        let block = Block::default().title(" News ").borders(Borders::ALL);

        if news.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No recent news", theme::muted())).block(block),
                area,
            );
            return;
        }

        let items: Vec<ListItem> = news
            .iter()
            .map(|item| {
                let sentiment = item.sentiment();
                let marker = match sentiment {
                    Sentiment::Positive => "▲",
                    Sentiment::Neutral => "•",
                    Sentiment::Negative => "▼",
                };
                let color = Style::default().fg(theme::sentiment_color(sentiment));

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{marker} {:+.2} ", item.sentiment_score), color),
                    Span::styled(
                        format!("{} ", item.published_at.format("%d %b %H:%M")),
                        theme::muted(),
                    ),
                    Span::raw(item.headline.clone()),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
