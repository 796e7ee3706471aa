// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciler tuning

use jobop_core::{NamingStrategy, DEFAULT_REQUEUE_AFTER};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Update attempts made after an optimistic-concurrency conflict.
pub const DEFAULT_CONFLICT_RETRIES: u32 = 3;

/// What to do when an existing CronJob no longer matches its Job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriftPolicy {
    /// Write the Job's fields back onto the CronJob.
    #[default]
    Correct,
    /// Leave existing CronJobs untouched after creation.
    Ignore,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown drift policy {0:?} (expected \"correct\" or \"ignore\")")]
pub struct ParsePolicyError(pub String);

impl FromStr for DriftPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correct" => Ok(DriftPolicy::Correct),
            "ignore" => Ok(DriftPolicy::Ignore),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Reconciler configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// How CronJob names derive from Job names
    pub naming: NamingStrategy,
    /// Whether existing CronJobs are kept in sync
    pub drift: DriftPolicy,
    /// Delay before retrying a failed Job fetch or CronJob create
    pub requeue_after: Duration,
    /// Re-fetch-and-retry budget for conflicting drift updates
    pub conflict_retries: u32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            naming: NamingStrategy::default(),
            drift: DriftPolicy::default(),
            requeue_after: DEFAULT_REQUEUE_AFTER,
            conflict_retries: DEFAULT_CONFLICT_RETRIES,
        }
    }
}
