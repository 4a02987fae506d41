//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Widest the search box and its dropdown get.
const SEARCH_WIDTH: u16 = 60;
/// Most dropdown rows shown at once.
const MAX_DROPDOWN_ROWS: u16 = 8;

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Quick search input.
    pub search_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Notification area (overlaid).
    pub notification_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, show_status_bar: bool) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(u16::from(show_status_bar)), // Status bar
                Constraint::Length(1),                          // Tab bar
                Constraint::Length(3),                          // Search box
                Constraint::Min(0),                             // Main content
            ])
            .split(area);

        let search_row = chunks[2];
        let search_area = Rect {
            width: search_row.width.min(SEARCH_WIDTH),
            ..search_row
        };

        // Notification area is pinned to the top right of the main area
        let main_area = chunks[3];
        let width = (area.width / 2).max(30).min(area.width);
        let notification_area = Rect {
            x: area.right().saturating_sub(width),
            y: main_area.y,
            width,
            height: 3.min(main_area.height),
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            search_area,
            main_area,
            notification_area,
        }
    }

    /// Area for a dropdown of `rows` entries below the search box.
    pub fn dropdown_area(&self, rows: usize) -> Rect {
        let wanted = (rows.max(1) as u16).min(MAX_DROPDOWN_ROWS) + 2;
        Rect {
            x: self.search_area.x,
            y: self.search_area.bottom(),
            width: self.search_area.width,
            height: wanted.min(self.main_area.height),
        }
    }

    /// Split the dashboard into movers, list and pagination footer.
    pub fn dashboard(&self, with_movers: bool, movers_rows: usize) -> (Option<Rect>, Rect, Rect) {
        let movers_height = if with_movers { movers_rows as u16 + 2 } else { 0 };
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(movers_height),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(self.main_area);

        (with_movers.then_some(chunks[0]), chunks[1], chunks[2])
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
