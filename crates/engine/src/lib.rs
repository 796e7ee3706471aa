// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobop reconcile engine

mod config;
mod error;
mod metrics;
mod reconciler;

pub use config::{DriftPolicy, ParsePolicyError, ReconcilerConfig, DEFAULT_CONFLICT_RETRIES};
pub use error::ReconcileError;
pub use metrics::{MetricsSnapshot, ReconcileMetrics};
pub use reconciler::Reconciler;
