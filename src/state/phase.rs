//! Load phase shared by the polled views.

/// Where a polled view is in its load cycle for the current parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewPhase {
    /// Waiting on the initial fetch; a loading indicator is shown.
    #[default]
    Loading,
    /// Data has been shown at least once for these parameters.
    Ready,
    /// The initial fetch failed; terminal until the parameters change.
    Failed(String),
}

impl ViewPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// What a state slot did with a fetch completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The slot changed.
    Applied,
    /// The completion belonged to an older mount or was superseded.
    Stale,
    /// A background failure was ignored; last-known-good data stays.
    Swallowed(String),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
