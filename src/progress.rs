//! # Progress Reporting
//!
//! Workers emit [`ProgressEvent`]s through a caller-supplied [`ProgressSink`].
//! Events are throttled per worker, arrive from worker threads in no
//! particular order, and are advisory only: a panicking sink is logged and
//! ignored.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

/// One progress update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Overall fraction of the search space covered, in `[0, 1]`.
    pub fraction: f64,
    pub status: String,
    /// Attempts per second of the emitting worker, when known.
    pub throughput: Option<f64>,
    /// Attempts made so far by the emitting worker.
    pub attempts: u64,
}

impl ProgressEvent {
    #[must_use]
    pub fn new(fraction: f64, status: impl Into<String>) -> Self {
        Self {
            fraction: fraction.clamp(0.0, 1.0),
            status: status.into(),
            throughput: None,
            attempts: 0,
        }
    }

    #[must_use]
    pub fn with_throughput(mut self, attempts_per_sec: f64) -> Self {
        self.throughput = Some(attempts_per_sec);
        self
    }

    #[must_use]
    pub fn with_attempts(mut self, attempts: u64) -> Self {
        self.attempts = attempts;
        self
    }
}

/// Receives progress events. Called from worker threads; must not block.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_progress(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Wraps an optional sink so that emission never fails the search.
#[derive(Clone, Default)]
pub(crate) struct ProgressReporter {
    sink: Option<Arc<dyn ProgressSink>>,
    sink_panicked: Arc<AtomicBool>,
}

impl ProgressReporter {
    pub(crate) fn new(sink: Option<Arc<dyn ProgressSink>>) -> Self {
        Self {
            sink,
            sink_panicked: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub(crate) fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub(crate) fn emit(&self, event: ProgressEvent) {
        let Some(sink) = &self.sink else {
            return;
        };
        if catch_unwind(AssertUnwindSafe(|| sink.on_progress(&event))).is_err()
            && !self.sink_panicked.swap(true, Ordering::Relaxed)
        {
            warn!("progress sink panicked; continuing search without interruption");
        }
    }
}

impl std::fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
