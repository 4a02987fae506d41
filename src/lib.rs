//! # MarketSentry - stock health dashboard
//!
//! A terminal dashboard that polls a stock health backend and shows a
//! paginated stock list, top movers, quick search and a per-stock detail
//! view with price history and news sentiment. Built with ratatui.
//!
//! ## Architecture
//!
//! - **App**: Terminal lifecycle and the main event loop
//! - **UI**: Layout and rendering logic
//! - **API**: HTTP access to the backend behind the [`api::StockApi`] trait
//! - **Sync**: Pollers, request sequencing and search debouncing
//! - **State**: Centralized state management through a reducer
//! - **Events**: Input handling
//! - **Config**: Layered configuration

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod sync;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
