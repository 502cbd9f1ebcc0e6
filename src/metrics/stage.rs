use crate::target::StatusOutcome;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Returned by the dispatcher once the output queue has been closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub dispatched: u64,
    pub peak_in_flight: usize,
}

/// Returned by the collector once the output queue has been drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub recorded: u64,
    pub failed: u64,
}

impl CollectStats {
    pub fn record(&mut self, outcome: &StatusOutcome) {
        self.recorded += 1;
        if outcome.is_failure() {
            self.failed += 1;
        }
    }
}

/// Counters owned by the dispatcher. Tasks of a single dispatcher run
/// share it by reference.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
    dispatched: AtomicU64,
}

impl InFlight {
    /// Marks one target as accepted. The returned guard marks it completed
    /// when dropped, whichever path the task takes.
    pub fn enter(&self) -> InFlightGuard<'_> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.dispatched.fetch_add(1, Ordering::SeqCst);
        InFlightGuard { counter: self }
    }

    pub fn current(&self) -> usize {
        self.current.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            dispatched: self.dispatched.load(Ordering::SeqCst),
            peak_in_flight: self.peak.load(Ordering::SeqCst),
        }
    }
}

pub(crate) struct InFlightGuard<'a> {
    counter: &'a InFlight,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.counter.current.fetch_sub(1, Ordering::SeqCst);
    }
}
