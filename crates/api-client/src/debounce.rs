//! Single-slot debouncing
//!
//! Each call replaces whatever is pending, so only the last call of a burst
//! runs, once the quiet period has passed.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

/// Runs the most recent of a burst of calls after a quiet period
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl Debouncer {
    /// Quiet period used for search-as-you-type
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// Debouncer with the given quiet period
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Quiet period
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` to run after the quiet period, cancelling the
    /// previously scheduled one if it has not finished.
    pub fn call<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        let previous = self.slot().replace(handle);
        if let Some(previous) = previous {
            if !previous.is_finished() {
                trace!("superseding pending call");
                previous.abort();
            }
        }
    }

    /// Cancels the pending call, if any
    pub fn cancel(&self) {
        if let Some(handle) = self.slot().take() {
            handle.abort();
        }
    }

    /// True while a call is scheduled or running
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
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

    fn recorder() -> Arc<Mutex<Vec<u32>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Arc<Mutex<Vec<u32>>>, value: u32) -> impl Future<Output = ()> + Send + 'static {
        let log = Arc::clone(log);
        async move { log.lock().unwrap().push(value) }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_of_burst_runs() {
        let debouncer = Debouncer::default();
        let log = recorder();

        for i in 0..3 {
            debouncer.call(record(&log, i));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*log.lock().unwrap(), vec![2]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_quiet_period() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let log = recorder();

        debouncer.call(record(&log, 1));
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(log.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*log.lock().unwrap(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        let log = recorder();

        debouncer.call(record(&log, 1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.call(record(&log, 2));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(*log.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::default();
        let log = recorder();

        debouncer.call(record(&log, 1));
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(log.lock().unwrap().is_empty());
    }
}
