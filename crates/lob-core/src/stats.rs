//! Engine statistics counters.
//!
//! A read-mostly telemetry surface: monotonic counters bumped on the hot
//! path with relaxed ordering. Observer threads may read them while the
//! engine mutates; reads are allowed to lag and to tear across unrelated
//! counters. They are not business state and reset only when the engine
//! is reconstructed.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Stats {
    orders_processed: AtomicU64,
    fills_generated: AtomicU64,
}

impl Stats {
    /// Orders admitted by submit (rejected orders are not counted).
    pub fn orders_processed(&self) -> u64 {
        self.orders_processed.load(Ordering::Relaxed)
    }

    /// Fills emitted by matching.
    pub fn fills_generated(&self) -> u64 {
        self.fills_generated.load(Ordering::Relaxed)
    }

    pub(crate) fn record_order(&self) {
        self.orders_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_fill(&self) {
        self.fills_generated.fetch_add(1, Ordering::Relaxed);
    }
}

impl Clone for Stats {
    fn clone(&self) -> Self {
        Stats {
            orders_processed: AtomicU64::new(self.orders_processed()),
            fills_generated: AtomicU64::new(self.fills_generated()),
        }
    }
}
