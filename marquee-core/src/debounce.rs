//! Cancellable single-slot delay timer for the free-text path.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Delays execution of a pending action, with at most one action armed at
/// a time. Scheduling a new action always supersedes a pending one; it
/// never queues alongside it.
///
/// Owned by the query controller rather than living in process-global
/// state, so `schedule`/`cancel` are explicit operations.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Creates a timer with no pending action.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arms `action` to run once after `delay`, cancelling any previously
    /// scheduled action.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        }));
    }

    /// Discards a pending action without executing it. No-op when nothing
    /// is armed.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while an action is armed and has not yet fired.
    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
