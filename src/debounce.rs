//! Single-slot debounce timer.
//!
//! Each `schedule` call replaces whatever was pending: the old timer task is
//! cancelled before the new one is armed, so at most one timer is ever live.
//! Timers are tokio tasks and need a running runtime.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::zlog_trace;

/// The one armed timer.
struct PendingTimer {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PendingTimer {
    fn cancel(self) {
        self.cancel.cancel();
    }
}

/// Coalesces bursts of calls into one delayed action.
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingTimer>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel the pending action (if any) and arm a new one.
    ///
    /// `action` runs exactly once, `delay` after this call, unless another
    /// `schedule` or `cancel_all` happens first.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel_all();

        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();
        let deadline = tokio::time::Instant::now() + self.delay;

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancel_clone.cancelled() => {
                    zlog_trace!("Debouncer: pending action cancelled");
                }
                _ = tokio::time::sleep_until(deadline) => {
                    action();
                }
            }
        });

        self.pending = Some(PendingTimer { cancel, handle });
    }

    /// Drop the pending action without running it.
    pub fn cancel_all(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.cancel();
        }
    }

    /// Whether an armed action has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|t| !t.cancel.is_cancelled() && !t.handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
