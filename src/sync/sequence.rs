//! Request sequencing and stale-response rejection.
//!
//! Every outgoing request takes a token from a shared [`Sequencer`]. Each
//! state slot keeps a [`SequenceGate`] that only lets strictly newer tokens
//! through, so a slow response can never overwrite a fresher one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A request token. Larger is newer.
pub type Seq = u64;

/// Hands out monotonically increasing request tokens.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    last: Arc<AtomicU64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next token.
    pub fn next(&self) -> Seq {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently issued token, or 0 if none.
    pub fn current(&self) -> Seq {
        self.last.load(Ordering::SeqCst)
    }
}

/// Per-slot record of the mount floor and the newest token applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceGate {
    floor: Seq,
    latest: Seq,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `seq` was issued after the slot's current mount.
    pub fn belongs(&self, seq: Seq) -> bool {
        seq > self.floor
    }

    /// Whether a response carrying `seq` would be applied.
    pub fn is_fresh(&self, seq: Seq) -> bool {
        self.belongs(seq) && seq > self.latest
    }

    /// Record `seq` as applied if it is fresh. Returns whether it was.
    pub fn admit(&mut self, seq: Seq) -> bool {
        if self.is_fresh(seq) {
            self.latest = seq;
            true
        } else {
            false
        }
    }

    /// Reject every token issued up to and including `floor`.
    ///
    /// Called on mount and unmount, so responses to requests issued before
    /// that point are dropped on arrival.
    pub fn raise_floor(&mut self, floor: Seq) {
        self.floor = self.floor.max(floor);
    }

    pub fn floor(&self) -> Seq {
        self.floor
    }

    pub fn latest(&self) -> Seq {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_is_monotonic_across_clones() {
        let seq = Sequencer::new();
        let other = seq.clone();

        assert_eq!(seq.current(), 0);
        assert_eq!(seq.next(), 1);
        assert_eq!(other.next(), 2);
        assert_eq!(seq.current(), 2);
    }

    #[test]
    fn test_gate_rejects_out_of_order_response() {
        let mut gate = SequenceGate::new();

        assert!(gate.admit(2));
        assert!(!gate.admit(1));
        assert!(!gate.admit(2));
        assert!(gate.admit(3));
        assert_eq!(gate.latest(), 3);
    }

    #[test]
    fn test_raise_floor_drops_earlier_requests() {
        let seq = Sequencer::new();
        let mut gate = SequenceGate::new();

        let before_remount = seq.next();
        gate.raise_floor(seq.current());
        let after_remount = seq.next();

        assert!(!gate.belongs(before_remount));
        assert!(!gate.is_fresh(before_remount));
        assert!(gate.admit(after_remount));
    }

    #[test]
    fn test_raise_floor_never_lowers() {
        let mut gate = SequenceGate::new();
        gate.raise_floor(10);
        gate.raise_floor(4);
        assert_eq!(gate.floor(), 10);
        assert!(!gate.belongs(7));
    }
}
