//! Cooperative early-stop signal for the training loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token checked by the trainer at epoch boundaries.
///
/// Stopping is cooperative, not preemptive: a request takes effect at the
/// next epoch boundary, and [`is_acknowledged`](StopSignal::is_acknowledged)
/// flips only once the training loop has actually observed the request and
/// terminated. Clones share state, so a handle captured inside an epoch
/// callback can stop the run that is driving it.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    requested: AtomicBool,
    acknowledged: AtomicBool,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the training loop to stop at the next epoch boundary.
    pub fn request(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Marked by the trainer when it observes the request and terminates.
    pub(crate) fn acknowledge(&self) {
        self.inner.acknowledged.store(true, Ordering::SeqCst);
    }

    pub fn is_acknowledged(&self) -> bool {
        self.inner.acknowledged.load(Ordering::SeqCst)
    }

    /// Clear both flags before a new training run.
    pub(crate) fn reset(&self) {
        self.inner.requested.store(false, Ordering::SeqCst);
        self.inner.acknowledged.store(false, Ordering::SeqCst);
    }
}
