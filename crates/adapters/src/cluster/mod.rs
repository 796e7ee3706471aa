// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster store adapters

mod kubernetes;

pub use kubernetes::KubeClusterAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ClusterCall, ClusterOp, FakeClusterAdapter};

use async_trait::async_trait;
use jobop_core::{CronJob, Job, ObjectKey};
use thiserror::Error;

/// Errors from cluster store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid: {0}")]
    Invalid(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("api error ({code}): {message}")]
    Api { code: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
}

impl ClusterError {
    /// Classify an API status response.
    ///
    /// The status `reason` is authoritative; the HTTP code is the fallback
    /// for servers and proxies that omit it.
    pub fn from_status(code: u16, reason: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match (reason, code) {
            ("NotFound", _) | ("", 404) => ClusterError::NotFound(message),
            ("AlreadyExists", _) => ClusterError::AlreadyExists(message),
            ("Conflict", _) | ("", 409) => ClusterError::Conflict(message),
            ("Invalid", _) | ("", 422) => ClusterError::Invalid(message),
            _ => ClusterError::Api { code, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, ClusterError::AlreadyExists(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, ClusterError::Invalid(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ClusterError::Conflict(_))
    }
}

impl From<kube::Error> for ClusterError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(status) => {
                ClusterError::from_status(status.code, &status.reason, status.message)
            }
            other => ClusterError::Transport(other.to_string()),
        }
    }
}

/// Read and write access to the resources the controller touches.
///
/// Each call is a single round trip to the cluster store; callers get the
/// stored object back so follow-up writes carry its resourceVersion.
#[async_trait]
pub trait ClusterAdapter: Clone + Send + Sync + 'static {
    /// Fetch a Job declaration
    async fn get_job(&self, key: &ObjectKey) -> Result<Job, ClusterError>;

    /// Fetch a CronJob
    async fn get_cron_job(&self, key: &ObjectKey) -> Result<CronJob, ClusterError>;

    /// Create a CronJob in its metadata namespace
    async fn create_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError>;

    /// Replace a CronJob, conditioned on its resourceVersion when set
    async fn update_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
