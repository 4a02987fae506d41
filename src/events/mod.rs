//! Event handling for MarketSentry.
//!
//! Terminal key, mouse and paste events are mapped to [`crate::state::Action`]s
//! according to the current input mode and view.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
