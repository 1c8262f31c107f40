//! Cancel-and-restart debouncing for search text input.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Cancel-and-restart delayed action.
///
/// Each [`schedule`](Self::schedule) aborts the previously scheduled action,
/// so only the last one submitted within the quiescent interval runs.
/// Pending work is aborted when the debouncer is dropped.
///
/// Every `schedule` and `cancel` advances a sequence number. An action that
/// has already fired may have queued work elsewhere before a later `cancel`;
/// the receiver checks [`is_current`](Self::is_current) to drop it.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    sequence: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sequence: 0,
            pending: None,
        }
    }

    /// Schedules `action(sequence)` after the delay and returns the sequence
    /// number it was issued under.
    pub fn schedule<F, Fut>(&mut self, action: F) -> u64
    where
        F: FnOnce(u64) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let sequence = self.sequence;
        let work = action(sequence);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        }));
        sequence
    }

    pub fn cancel(&mut self) {
        self.sequence += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether `sequence` belongs to the most recent schedule, with no
    /// schedule or cancel since.
    pub fn is_current(&self, sequence: u64) -> bool {
        self.pending.is_some() && sequence == self.sequence
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
