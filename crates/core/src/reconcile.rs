// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling directives returned from a reconcile.

use std::time::Duration;

/// Fixed delay before retrying a reconcile that failed on a transient error.
pub const DEFAULT_REQUEUE_AFTER: Duration = Duration::from_secs(60);

/// Tells the scheduling loop when to invoke the reconciler again.
///
/// `requeue_after` implies `requeue`. A result with neither waits for the
/// next change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileResult {
    pub requeue: bool,
    pub requeue_after: Option<Duration>,
}

impl ReconcileResult {
    /// Converged; wait for the next notification.
    pub fn done() -> Self {
        Self::default()
    }

    /// Run again as soon as the scheduling loop allows.
    pub fn requeue() -> Self {
        Self {
            requeue: true,
            requeue_after: None,
        }
    }

    /// Run again after `delay`.
    pub fn requeue_after(delay: Duration) -> Self {
        Self {
            requeue: true,
            requeue_after: Some(delay),
        }
    }

    pub fn is_done(&self) -> bool {
        !self.requeue && self.requeue_after.is_none()
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
