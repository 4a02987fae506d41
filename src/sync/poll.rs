//! Interval polling with cancellable handles.

use super::sequence::{Seq, Sequencer};
use crate::error::Result;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Whether a fetch gates the loading state or refreshes silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First fetch after a mount; drives the loading indicator.
    Initial,
    /// Timer-driven refresh; failures are logged and ignored.
    Background,
}

impl FetchMode {
    pub fn is_initial(self) -> bool {
        self == Self::Initial
    }
}

/// The outcome of one fetch, tagged with its request token.
#[derive(Debug)]
pub struct Completion<T> {
    pub seq: Seq,
    pub mode: FetchMode,
    pub result: Result<T>,
}

/// Starts pollers that share one interval and one token source.
#[derive(Debug, Clone)]
pub struct PollScheduler {
    interval: Duration,
    sequencer: Sequencer,
}

impl PollScheduler {
    pub fn new(interval: Duration, sequencer: Sequencer) -> Self {
        Self {
            interval,
            sequencer,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Fetch once immediately in [`FetchMode::Initial`], then once per
    /// interval in [`FetchMode::Background`], until the handle is cancelled.
    ///
    /// Each fetch runs as its own task, so a slow response does not hold back
    /// the next tick. Completions that resolve after cancellation are dropped
    /// instead of being passed to `deliver`.
    pub fn start<T, F, Fut, D>(&self, name: &'static str, fetch: F, deliver: D) -> PollHandle
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        D: Fn(Completion<T>) + Send + Sync + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let guard = Arc::clone(&cancelled);
        let deliver = Arc::new(deliver);
        let interval = self.interval;
        let sequencer = self.sequencer.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut mode = FetchMode::Initial;

            loop {
                ticker.tick().await;
                if guard.load(Ordering::SeqCst) {
                    break;
                }

                let seq = sequencer.next();
                tracing::debug!(poller = name, seq, ?mode, "issuing fetch");

                let request = fetch();
                let deliver = Arc::clone(&deliver);
                let guard = Arc::clone(&guard);
                tokio::spawn(async move {
                    let result = request.await;
                    // Token was issued before any cancel that this load misses,
                    // so the slot's sequence floor still rejects it.
                    if guard.load(Ordering::SeqCst) {
                        tracing::debug!(poller = name, seq, "dropping completion after cancel");
                        return;
                    }
                    deliver(Completion { seq, mode, result });
                });

                mode = FetchMode::Background;
            }
        });

        PollHandle {
            name,
            cancelled,
            task: Some(task),
        }
    }
}

/// Owner of a running poller. Cancelling is idempotent; dropping cancels.
#[derive(Debug)]
pub struct PollHandle {
    name: &'static str,
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stop the timer and discard any completion still in flight.
    pub fn cancel(&mut self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
        tracing::debug!(poller = self.name, "poller cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::mpsc;

    const INTERVAL: Duration = Duration::from_millis(5000);

    fn counting_fetch(
        calls: Arc<AtomicUsize>,
        latency: Duration,
    ) -> impl Fn() -> futures::future::BoxFuture<'static, Result<usize>> + Send + Sync + 'static
    {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                tokio::time::sleep(latency).await;
                Ok(n)
            })
        }
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_then_background() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let scheduler = PollScheduler::new(INTERVAL, Sequencer::new());

        let _handle = scheduler.start(
            "test",
            counting_fetch(Arc::clone(&calls), Duration::ZERO),
            move |c| {
                let _ = tx.send(c);
            },
        );

        let first = rx.recv().await.unwrap();
        assert_eq!(first.mode, FetchMode::Initial);
        assert_eq!(first.result.unwrap(), 0);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.mode, FetchMode::Background);
        assert!(second.seq > first.seq);

        let third = rx.recv().await.unwrap();
        assert_eq!(third.mode, FetchMode::Background);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_keeps_ticking_after_failure() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = PollScheduler::new(INTERVAL, Sequencer::new());

        let _handle = scheduler.start(
            "failing",
            || async { Err::<(), _>(Error::network("connection refused")) },
            move |c| {
                let _ = tx.send(c);
            },
        );

        for expected in [FetchMode::Initial, FetchMode::Background, FetchMode::Background] {
            let completion = rx.recv().await.unwrap();
            assert_eq!(completion.mode, expected);
            assert!(completion.result.is_err());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let scheduler = PollScheduler::new(INTERVAL, Sequencer::new());

        let mut handle = scheduler.start(
            "test",
            counting_fetch(Arc::clone(&calls), Duration::ZERO),
            move |c| {
                let _ = tx.send(c);
            },
        );

        assert!(rx.recv().await.is_some());
        handle.cancel();
        tokio::time::sleep(INTERVAL * 4).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_in_flight_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let calls = Arc::new(AtomicUsize::new(0));
        let scheduler = PollScheduler::new(INTERVAL, Sequencer::new());

        let mut handle = scheduler.start(
            "slow",
            counting_fetch(Arc::clone(&calls), Duration::from_secs(1)),
            move |c| {
                let _ = tx.send(c);
            },
        );

        settle().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        handle.cancel();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_idempotent() {
        let scheduler = PollScheduler::new(INTERVAL, Sequencer::new());
        let mut handle = scheduler.start("noop", || async { Ok(()) }, |_| {});

        handle.cancel();
        handle.cancel();
        assert!(handle.is_cancelled());
        drop(handle);
    }
}
