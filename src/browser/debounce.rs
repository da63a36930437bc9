//! Re-arming debounce timer for search input
//!
//! Each keystroke re-arms the timer; the action runs once after a quiet
//! period. Cancellation tokens carry the re-arm/teardown signal.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Quiet period after the last keystroke before the search filter runs
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

pub struct Debouncer {
    delay: Duration,
    pending: Option<CancellationToken>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm the timer, cancelling any pending run. `action` fires exactly
    /// once after the quiet period unless another call re-arms first.
    pub fn arm<F>(&mut self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }

        let token = CancellationToken::new();
        self.pending = Some(token.clone());
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => action.await,
            }
        });
    }

    /// Drop any pending run without firing it
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
