//! Event handler for processing input events.

use super::InputEvent;
use crate::config::KeyBindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use std::time::Duration;

/// Handles input events and produces actions.
pub struct EventHandler {
    /// Key bindings.
    keybindings: KeyBindings,
    /// How long to wait for terminal input per call.
    poll_timeout: Duration,
    /// Store reference for state-aware handling.
    store_snapshot: Option<StoreSnapshot>,
}

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Default)]
struct StoreSnapshot {
    input_mode: InputMode,
    current_view: View,
    show_help: bool,
    has_notification: bool,
    /// Search box plus its dropdown, as last drawn.
    search_area: Rect,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(keybindings: KeyBindings, poll_timeout: Duration) -> Self {
        Self {
            keybindings,
            poll_timeout,
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store, search_area: Rect) {
        self.store_snapshot = Some(StoreSnapshot {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
            show_help: store.app.show_help,
            has_notification: store.app.notification.is_some(),
            search_area,
        });
    }

    /// Get the next action from user input.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        if event::poll(self.poll_timeout)? {
            match event::read()? {
                CrosstermEvent::Key(key) => return Ok(self.handle_key(key)),
                CrosstermEvent::Mouse(mouse) => return Ok(self.handle_mouse(mouse)),
                CrosstermEvent::Paste(text) => return Ok(self.handle_paste(&text)),
                // Terminal will automatically redraw
                _ => {}
            }
        }
        Ok(None)
    }

    /// Handle a key event and return an optional action.
    fn handle_key(&self, key: KeyEvent) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let snapshot = self.store_snapshot.as_ref()?;
        let input = InputEvent::from(key);

        if input.ctrl() && input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }

        match snapshot.input_mode {
            InputMode::Normal => self.handle_normal_mode(input, snapshot),
            InputMode::Search => self.handle_search_mode(key, input),
            InputMode::Filter => self.handle_filter_mode(key, input),
        }
    }

    /// Handle a mouse event and return an optional action.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        let snapshot = self.store_snapshot.as_ref()?;
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            MouseEventKind::Down(MouseButton::Left) => {
                let inside = snapshot
                    .search_area
                    .contains(Position::new(mouse.column, mouse.row));
                if inside {
                    (snapshot.input_mode != InputMode::Search).then_some(Action::FocusSearch)
                } else {
                    Some(Action::DismissSearch)
                }
            }
            _ => None,
        }
    }

    fn handle_paste(&self, text: &str) -> Option<Action> {
        let snapshot = self.store_snapshot.as_ref()?;
        match snapshot.input_mode {
            InputMode::Filter => {
                let line = text.lines().next().unwrap_or_default();
                Some(Action::SetSearchTerm(line.trim().to_string()))
            }
            // Pasted text arrives as one event; only the first char is typed.
            InputMode::Search => text
                .chars()
                .find(|c| !c.is_control())
                .map(Action::SearchPush),
            InputMode::Normal => None,
        }
    }

    fn handle_normal_mode(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let keys = &self.keybindings;

        // Global shortcuts
        if input.matches(&keys.quit) {
            return Some(Action::Quit);
        }
        if input.matches(&keys.help) {
            return Some(Action::ToggleHelp);
        }
        if snapshot.show_help {
            return input.matches(&keys.back).then_some(Action::ToggleHelp);
        }
        if input.matches(&keys.search) {
            return Some(Action::FocusSearch);
        }

        // Navigation
        if input.matches(&keys.up) || input.key == super::Key::Up {
            return Some(Action::ScrollUp);
        }
        if input.matches(&keys.down) || input.key == super::Key::Down {
            return Some(Action::ScrollDown);
        }
        if input.key == super::Key::Home {
            return Some(Action::GoToTop);
        }
        if input.key == super::Key::End {
            return Some(Action::GoToBottom);
        }

        // View-specific actions
        match snapshot.current_view {
            View::Dashboard => self.handle_dashboard_view(input, snapshot),
            View::StockDetail => self.handle_detail_view(input),
        }
    }

    fn handle_dashboard_view(&self, input: InputEvent, snapshot: &StoreSnapshot) -> Option<Action> {
        let keys = &self.keybindings;

        if input.matches(&keys.select) {
            return Some(Action::OpenSelectedStock);
        }
        if input.matches(&keys.filter) {
            return Some(Action::SetInputMode(InputMode::Filter));
        }
        if input.matches(&keys.next_page) || input.key == super::Key::Right {
            return Some(Action::NextPage);
        }
        if input.matches(&keys.prev_page) || input.key == super::Key::Left {
            return Some(Action::PreviousPage);
        }
        if input.matches(&keys.back) && snapshot.has_notification {
            return Some(Action::DismissNotification);
        }

        None
    }

    fn handle_detail_view(&self, input: InputEvent) -> Option<Action> {
        let keys = &self.keybindings;

        if input.matches(&keys.back)
            || input.matches(&keys.dashboard)
            || input.key == super::Key::Backspace
        {
            return Some(Action::Back);
        }

        None
    }

    fn handle_search_mode(&self, key: KeyEvent, input: InputEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Tab => Some(Action::DismissSearch),
            KeyCode::Enter => Some(Action::SelectSearchResult),
            KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Backspace => Some(Action::SearchPop),
            _ => input.text().map(Action::SearchPush),
        }
    }

    fn handle_filter_mode(&self, key: KeyEvent, input: InputEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::SetInputMode(InputMode::Normal)),
            KeyCode::Backspace => Some(Action::FilterPop),
            _ if input.matches("Ctrl+u") => Some(Action::SetSearchTerm(String::new())),
            _ => input.text().map(Action::FilterPush),
        }
    }
}
