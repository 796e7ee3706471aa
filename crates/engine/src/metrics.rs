// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconcile counters.
//!
//! Best-effort steps swallow their errors; the counters keep those failures
//! observable without surfacing them to the scheduling loop.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters shared by every reconcile of one reconciler.
#[derive(Debug, Default)]
pub struct ReconcileMetrics {
    reconciles: AtomicU64,
    created: AtomicU64,
    updated: AtomicU64,
    swallowed_update_errors: AtomicU64,
    failures: AtomicU64,
}

/// Point-in-time copy of [`ReconcileMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub reconciles: u64,
    pub created: u64,
    pub updated: u64,
    pub swallowed_update_errors: u64,
    pub failures: u64,
}

impl ReconcileMetrics {
    pub fn record_reconcile(&self) {
        self.reconciles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swallowed_update_error(&self) {
        self.swallowed_update_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            reconciles: self.reconciles.load(Ordering::Relaxed),
            created: self.created.load(Ordering::Relaxed),
            updated: self.updated.load(Ordering::Relaxed),
            swallowed_update_errors: self.swallowed_update_errors.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
