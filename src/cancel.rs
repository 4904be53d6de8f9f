//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One-way stop flag shared between an engine, its workers and any thread
/// that wants to abort the running attack.
///
/// Cloning yields another handle to the same flag. Setting it is idempotent;
/// only the owning engine resets it, at the start of each attack.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    stopped: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Safe to call any number of times from any thread.
    #[inline]
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn reset(&self) {
        self.stopped.store(false, Ordering::Release);
    }
}
