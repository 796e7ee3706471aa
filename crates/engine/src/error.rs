// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the reconciler

use jobop_adapters::ClusterError;
use jobop_core::{ObjectKey, ReconcileResult};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced from a reconcile.
///
/// Only failures that leave the end state unknown or unreached are surfaced.
/// Each error carries the scheduling directive the loop should apply.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to fetch job {key}: {source}")]
    FetchJob {
        key: ObjectKey,
        source: ClusterError,
        requeue_after: Duration,
    },
    #[error("failed to fetch cron job {key}: {source}")]
    FetchCronJob { key: ObjectKey, source: ClusterError },
    #[error("failed to create cron job {key}: {source}")]
    CreateCronJob {
        key: ObjectKey,
        source: ClusterError,
        requeue_after: Duration,
    },
    #[error("failed to update cron job {key}: {source}")]
    UpdateCronJob { key: ObjectKey, source: ClusterError },
    #[error("reconcile of {key} timed out after {timeout:?}")]
    Timeout { key: ObjectKey, timeout: Duration },
}

impl ReconcileError {
    /// Explicit retry delay, or `None` to defer to the caller's backoff.
    pub fn requeue_after(&self) -> Option<Duration> {
        match self {
            ReconcileError::FetchJob { requeue_after, .. }
            | ReconcileError::CreateCronJob { requeue_after, .. } => Some(*requeue_after),
            ReconcileError::FetchCronJob { .. }
            | ReconcileError::UpdateCronJob { .. }
            | ReconcileError::Timeout { .. } => None,
        }
    }

    /// The directive accompanying this error.
    pub fn result(&self) -> ReconcileResult {
        match self.requeue_after() {
            Some(delay) => ReconcileResult::requeue_after(delay),
            None => ReconcileResult::done(),
        }
    }

    /// The key of the object the failing call targeted.
    pub fn key(&self) -> &ObjectKey {
        match self {
            ReconcileError::FetchJob { key, .. }
            | ReconcileError::FetchCronJob { key, .. }
            | ReconcileError::CreateCronJob { key, .. }
            | ReconcileError::UpdateCronJob { key, .. }
            | ReconcileError::Timeout { key, .. } => key,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
