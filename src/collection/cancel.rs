//! Cooperative cancellation shared by one exploration
//!
//! The search call and every detail fetch spawned from it hold clones of the
//! same handle. Cancelling is a flag flip plus a wake-up for anything
//! currently awaiting `cancelled()`; nothing is interrupted forcibly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Handle for cancelling every operation of one exploration
#[derive(Debug, Clone, Default)]
pub struct CancellationHandle {
    state: Arc<CancelState>,
}

impl CancellationHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the associated operations
    ///
    /// Idempotent. Never blocks.
    pub fn cancel(&self) {
        if !self.state.cancelled.swap(true, Ordering::AcqRel) {
            self.state.notify.notify_waiters();
        }
    }

    /// Check if the operation has been cancelled
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once `cancel()` has been called
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed
            let notified = self.state.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// True if both handles control the same exploration
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}
