// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::cluster::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use jobop_core::{CronJob, Job, ObjectKey};
use kube::ResourceExt;
use std::time::Instant;
use tracing::Instrument;

/// Wrapper that adds tracing to any ClusterAdapter
#[derive(Clone)]
pub struct TracedCluster<C> {
    inner: C,
}

impl<C> TracedCluster<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

/// Log the outcome of a read. Not-found is an expected answer, not a failure.
fn log_read<T>(result: &Result<T, ClusterError>, elapsed_ms: u64) {
    match result {
        Ok(_) => tracing::debug!(elapsed_ms, "fetched"),
        Err(e) if e.is_not_found() => tracing::debug!(elapsed_ms, "not found"),
        Err(e) => tracing::warn!(elapsed_ms, error = %e, "fetch failed"),
    }
}

fn log_write(result: &Result<CronJob, ClusterError>, elapsed_ms: u64, verb: &str) {
    match result {
        Ok(stored) => tracing::info!(
            resource_version = %stored.resource_version().unwrap_or_default(),
            elapsed_ms,
            "{verb}"
        ),
        Err(e) => tracing::warn!(elapsed_ms, error = %e, "{verb} failed"),
    }
}

#[async_trait]
impl<C: ClusterAdapter> ClusterAdapter for TracedCluster<C> {
    async fn get_job(&self, key: &ObjectKey) -> Result<Job, ClusterError> {
        async {
            let start = Instant::now();
            let result = self.inner.get_job(key).await;
            log_read(&result, start.elapsed().as_millis() as u64);
            result
        }
        .instrument(tracing::debug_span!("cluster.get_job", key = %key))
        .await
    }

    async fn get_cron_job(&self, key: &ObjectKey) -> Result<CronJob, ClusterError> {
        async {
            let start = Instant::now();
            let result = self.inner.get_cron_job(key).await;
            log_read(&result, start.elapsed().as_millis() as u64);
            result
        }
        .instrument(tracing::debug_span!("cluster.get_cron_job", key = %key))
        .await
    }

    async fn create_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError> {
        let span = tracing::info_span!(
            "cluster.create_cron_job",
            namespace = %cron_job.namespace().unwrap_or_default(),
            name = %cron_job.name_any(),
        );
        async {
            let start = Instant::now();
            let result = self.inner.create_cron_job(cron_job).await;
            log_write(&result, start.elapsed().as_millis() as u64, "created");
            result
        }
        .instrument(span)
        .await
    }

    async fn update_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError> {
        let span = tracing::info_span!(
            "cluster.update_cron_job",
            namespace = %cron_job.namespace().unwrap_or_default(),
            name = %cron_job.name_any(),
        );
        async {
            let start = Instant::now();
            let result = self.inner.update_cron_job(cron_job).await;
            log_write(&result, start.elapsed().as_millis() as u64, "updated");
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
