//! Per-process request counter.
//!
//! `RequestCounter` is a cloneable handle over a single shared atomic cell.
//! The handler side calls [`RequestCounter::increment`] once per counted
//! request; the reporter side calls [`RequestCounter::drain`], which reads
//! and zeroes the cell in one atomic swap. Every increment therefore lands
//! in exactly one drain, no matter how the two sides interleave.
//!
//! The counter is owned by whoever constructs it and handed to the parties
//! that need it; there is no process-global instance, so tests can run any
//! number of independent counters side by side.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Cloneable handle to a shared hit counter.
#[derive(Clone, Debug, Default)]
pub struct RequestCounter {
    hits: Arc<AtomicU64>,
}

impl RequestCounter {
    /// New counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request. Safe from any number of concurrent callers; no
    /// update is lost.
    pub fn increment(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Return the count accumulated since the previous drain and reset it to
    /// zero in a single atomic step.
    pub fn drain(&self) -> u64 {
        self.hits.swap(0, Ordering::Relaxed)
    }
}
