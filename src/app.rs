//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, pollers, and rendering.

use crate::api::{ApiClient, StockApi};
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::state::{Action, Store, View};
use crate::sync::SyncCoordinator;
use crate::ui::Ui;

use chrono::Utc;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver, fed by pollers and search lookups.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Pollers of the mounted view.
    sync: SyncCoordinator,
    /// Renderer.
    ui: Ui,
    /// Whether mouse capture was enabled.
    mouse_capture: bool,
}

impl App {
    /// Create a new application.
    pub async fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn StockApi> = Arc::new(ApiClient::new(config.api.clone())?);
        tracing::info!(base_url = %config.api.base_url, "using stock backend");

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let mouse_capture = config.ui.mouse_support;
        if mouse_capture {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, EnterAlternateScreen)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let store = Store::new(&config.sync);
        let sync = SyncCoordinator::new(api, config.sync.clone(), action_tx);
        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms),
        );
        let ui = Ui::new(&config);

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            sync,
            ui,
            mouse_capture,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.sync_effects();

        // Main event loop
        loop {
            self.store.expire_notification(Utc::now());

            // Render UI
            let mut search_hitbox = Rect::default();
            self.terminal.draw(|frame| {
                search_hitbox = self.ui.render(frame, &self.store);
            })?;

            // Update event handler with current state
            self.event_handler
                .update_store_snapshot(&self.store, search_hitbox);

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle fetch completions
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        tracing::info!("shutting down");
        self.sync.shutdown();
        Ok(())
    }

    /// Reduce an action, then bring the pollers in line with the new state.
    fn handle_action(&mut self, action: Action) {
        self.store.reduce(action);
        self.sync_effects();
    }

    /// Mount, remount or tear down pollers to match what the store shows.
    ///
    /// Each floor returned by the coordinator is reduced before any queued
    /// completion is handled, so nothing from a cancelled poller is applied.
    fn sync_effects(&mut self) {
        match self.store.app.current_view {
            View::Dashboard => {
                let params = self.store.list.params();
                if !self.sync.is_dashboard_mounted() {
                    let floor = self.sync.mount_dashboard(params);
                    self.store.reduce(Action::DetailUnmounted(floor));
                    self.store.reduce(Action::ListMounted(floor));
                    self.store.reduce(Action::MoversMounted(floor));
                } else if self.sync.list_params() != Some(&params) {
                    let floor = self.sync.remount_list(params);
                    self.store.reduce(Action::ListMounted(floor));
                }
            }
            View::StockDetail => {
                if let Some(ticker) = self.store.detail.ticker.clone()
                    && self.sync.detail_ticker() != Some(ticker.as_str())
                {
                    let floor = self.sync.mount_detail(ticker);
                    self.store.reduce(Action::ListUnmounted(floor));
                    self.store.reduce(Action::MoversUnmounted(floor));
                    self.store.reduce(Action::DetailMounted(floor));
                }
            }
        }

        let query = self.store.search.query.clone();
        if let Some(floor) = self.sync.search_changed(&query) {
            self.store.reduce(Action::SearchCleared(floor));
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.sync.shutdown();

        // Restore terminal state
        let _ = disable_raw_mode();
        if self.mouse_capture {
            let _ = execute!(
                self.terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            );
        } else {
            let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        }
        let _ = self.terminal.show_cursor();
    }
}
