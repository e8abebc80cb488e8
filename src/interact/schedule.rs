//! Cancellable scheduled tasks
//!
//! Debounce timers and feedback auto-reverts are delayed one-shot jobs
//! owned by the controller. Dropping or cancelling the handle aborts the
//! job; a job that already ran is unaffected.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// A one-shot job scheduled to run after a delay.
///
/// The handle owns the job: cancelling it (or dropping the handle) before
/// the delay elapses means the job never runs.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Spawn `job` to run once `delay` has elapsed.
    pub fn spawn<F>(delay: Duration, job: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        });
        Self { handle }
    }

    /// Abort the job if it has not started yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the job has run (or been aborted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// True while the delay is still pending.
    pub fn is_pending(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let task = ScheduledTask::spawn(Duration::from_millis(100), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(task.is_pending());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_firing() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let task = ScheduledTask::spawn(Duration::from_millis(100), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        task.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_job() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        {
            let _task = ScheduledTask::spawn(Duration::from_millis(100), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
