//! UI rendering using ratatui.
//!
//! This module contains all TUI components and rendering logic.

mod layout;
mod theme;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    DetailView, HelpPanel, MoversPanel, NewsList, Pagination, SearchBox, StatusBar, StockList,
    TabBar,
};

use crate::config::{Config, KeyBindings};
use crate::state::{Store, View};
use ratatui::Frame;
use ratatui::layout::Rect;

/// Main UI renderer.
pub struct Ui {
    keybindings: KeyBindings,
    show_status_bar: bool,
}

impl Ui {
    pub fn new(config: &Config) -> Self {
        Self {
            keybindings: config.keybindings.clone(),
            show_status_bar: config.ui.show_status_bar,
        }
    }

    /// Render the entire UI.
    ///
    /// Returns the area covered by the search box and its dropdown, for
    /// routing mouse clicks.
    pub fn render(&self, frame: &mut Frame, store: &Store) -> Rect {
        let layout = Layout::new(frame.area(), self.show_status_bar);

        if self.show_status_bar {
            StatusBar::render(frame, layout.status_area, store);
        }
        TabBar::render(frame, layout.tab_area, store);
        SearchBox::render(frame, layout.search_area, store);

        // Render main content based on current view
        match store.app.current_view {
            View::Dashboard => {
                let movers_rows = store
                    .movers
                    .top_buys
                    .len()
                    .max(store.movers.top_sells.len());
                let with_movers = store.shows_movers() && movers_rows > 0;
                let (movers_area, list_area, footer_area) =
                    layout.dashboard(with_movers, movers_rows);

                if let Some(area) = movers_area {
                    MoversPanel::render(frame, area, store);
                }
                StockList::render(frame, list_area, store);
                Pagination::render(frame, footer_area, &store.list);
            }
            View::StockDetail => {
                DetailView::render(frame, layout.main_area, &store.detail);
            }
        }

        // The dropdown overlays the main content
        let search_hitbox = match SearchBox::render_dropdown(frame, &layout, store) {
            Some(dropdown) => layout.search_area.union(dropdown),
            None => layout.search_area,
        };

        // Render help panel if visible
        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), &self.keybindings);
        }

        // Render notification if present
        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }

        search_hitbox
    }
}
