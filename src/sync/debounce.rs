//! Trailing-edge debounce.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs an action only after a quiet period with no newer call.
///
/// Each [`Debouncer::call`] restarts the delay. Once the delay elapses the
/// action is spawned as its own task, so a later call cancels the timer but
/// never an action that has already started.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Restart the quiet period with `action` as the trailing call.
    pub fn call<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        }));
    }

    /// Drop the pending action, if its delay has not elapsed yet.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DELAY: Duration = Duration::from_millis(300);

    fn bump(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once_after_quiet_period() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(DELAY);

        for _ in 0..5 {
            debouncer.call(bump(&runs));
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        // 50ms have passed since the last call.
        tokio::time::sleep(Duration::from_millis(249)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_action() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.call(bump(&runs));
        assert!(debouncer.is_pending());
        debouncer.cancel();
        tokio::time::sleep(DELAY * 2).await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_started_action_survives_new_call() {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let mut debouncer = Debouncer::new(DELAY);

        let (s, f) = (Arc::clone(&started), Arc::clone(&finished));
        debouncer.call(async move {
            s.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(1)).await;
            f.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        debouncer.call(async {});
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
