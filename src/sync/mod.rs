//! Polling, request sequencing and debouncing.
//!
//! Fetch loops never touch state: they send [`crate::state::Action`]s tagged
//! with a [`Seq`] token, and each state slot decides whether the token is
//! still current.

mod coordinator;
mod debounce;
mod poll;
mod sequence;

pub use coordinator::SyncCoordinator;
pub use debounce::Debouncer;
pub use poll::{Completion, FetchMode, PollHandle, PollScheduler};
pub use sequence::{Seq, SequenceGate, Sequencer};
