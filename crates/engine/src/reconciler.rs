// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job → CronJob convergence.
//!
//! One invocation handles one Job key:
//!
//! - Job missing: it was deleted; the owned CronJob goes with it through
//!   garbage collection, so there is nothing to do.
//! - CronJob missing: build it, create it, then issue a best-effort update
//!   of the stored object so server-assigned defaults settle.
//! - CronJob present: under [`DriftPolicy::Correct`], write back any managed
//!   field that no longer matches the Job, retrying on conflicts.
//!
//! The reconciler keeps no state between invocations apart from counters.
//! Invocations for the same key are serialized by the caller.

use jobop_adapters::{ClusterAdapter, ClusterError};
use jobop_core::{
    apply_desired, build_cron_job, detect_drift, is_controlled_by, CronJob, Job, ObjectKey,
    ReconcileResult,
};
use tracing::{debug, error, info, warn, Instrument};

use crate::config::{DriftPolicy, ReconcilerConfig};
use crate::error::ReconcileError;
use crate::metrics::{MetricsSnapshot, ReconcileMetrics};

/// Reconciles Job declarations against their derived CronJobs.
pub struct Reconciler<C> {
    cluster: C,
    config: ReconcilerConfig,
    metrics: ReconcileMetrics,
}

impl<C: ClusterAdapter> Reconciler<C> {
    pub fn new(cluster: C, config: ReconcilerConfig) -> Self {
        Self {
            cluster,
            config,
            metrics: ReconcileMetrics::default(),
        }
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Drive the CronJob for the Job at `key` toward the Job's spec.
    pub async fn reconcile(&self, key: &ObjectKey) -> Result<ReconcileResult, ReconcileError> {
        let span = tracing::info_span!(
            "reconcile",
            namespace = %key.namespace,
            job = %key.name,
        );
        self.metrics.record_reconcile();
        let result = self.reconcile_job(key).instrument(span).await;
        if result.is_err() {
            self.metrics.record_failure();
        }
        result
    }

    async fn reconcile_job(&self, key: &ObjectKey) -> Result<ReconcileResult, ReconcileError> {
        let job = match self.cluster.get_job(key).await {
            Ok(job) => job,
            Err(e) if e.is_not_found() => {
                info!("job not found, probably deleted; skipping");
                return Ok(ReconcileResult::done());
            }
            Err(e) => {
                error!(error = %e, "could not fetch job");
                return Err(ReconcileError::FetchJob {
                    key: key.clone(),
                    source: e,
                    requeue_after: self.config.requeue_after,
                });
            }
        };

        let cron_key = key.sibling(self.config.naming.cron_job_name(&key.name));
        match self.cluster.get_cron_job(&cron_key).await {
            Ok(observed) => self.converge(&cron_key, &job, observed).await,
            Err(e) if e.is_not_found() => self.create(&cron_key, &job).await,
            Err(e) => {
                error!(cron_job = %cron_key.name, error = %e, "could not fetch cron job");
                Err(ReconcileError::FetchCronJob {
                    key: cron_key,
                    source: e,
                })
            }
        }
    }

    async fn create(
        &self,
        cron_key: &ObjectKey,
        job: &Job,
    ) -> Result<ReconcileResult, ReconcileError> {
        info!(cron_job = %cron_key.name, "creating cron job");
        let cron_job = build_cron_job(&cron_key.namespace, job, &self.config.naming);

        let created = match self.cluster.create_cron_job(&cron_job).await {
            Ok(created) => created,
            Err(e) => {
                error!(cron_job = %cron_key.name, error = %e, "could not create cron job");
                return Err(ReconcileError::CreateCronJob {
                    key: cron_key.clone(),
                    source: e,
                    requeue_after: self.config.requeue_after,
                });
            }
        };
        self.metrics.record_created();

        // Settle server-assigned defaults; the create already succeeded
        if let Err(e) = self.cluster.update_cron_job(&created).await {
            self.metrics.record_swallowed_update_error();
            if e.is_invalid() {
                warn!(cron_job = %cron_key.name, error = %e, "invalid update after create");
            } else {
                warn!(cron_job = %cron_key.name, error = %e, "unable to update after create");
            }
        }

        Ok(ReconcileResult::done())
    }

    async fn converge(
        &self,
        cron_key: &ObjectKey,
        job: &Job,
        mut observed: CronJob,
    ) -> Result<ReconcileResult, ReconcileError> {
        if self.config.drift == DriftPolicy::Ignore {
            debug!(cron_job = %cron_key.name, "cron job exists");
            return Ok(ReconcileResult::done());
        }
        if !is_controlled_by(&observed, job) {
            warn!(
                cron_job = %cron_key.name,
                "cron job is not controlled by this job; leaving it untouched"
            );
            return Ok(ReconcileResult::done());
        }

        let desired = build_cron_job(&cron_key.namespace, job, &self.config.naming);
        let mut attempt = 0;
        loop {
            let Some(drift) = detect_drift(&desired, &observed) else {
                debug!(cron_job = %cron_key.name, "cron job up to date");
                return Ok(ReconcileResult::done());
            };
            info!(cron_job = %cron_key.name, fields = %drift, "cron job drifted; updating");

            let patched = apply_desired(observed, &desired);
            match self.cluster.update_cron_job(&patched).await {
                Ok(_) => {
                    self.metrics.record_updated();
                    return Ok(ReconcileResult::done());
                }
                Err(e) if e.is_conflict() && attempt < self.config.conflict_retries => {
                    attempt += 1;
                    warn!(cron_job = %cron_key.name, attempt, "conflict updating cron job; retrying");
                    observed = match self.refetch(cron_key).await? {
                        Some(fresh) => fresh,
                        None => return Ok(ReconcileResult::done()),
                    };
                }
                Err(e) => {
                    error!(cron_job = %cron_key.name, error = %e, "could not update cron job");
                    return Err(ReconcileError::UpdateCronJob {
                        key: cron_key.clone(),
                        source: e,
                    });
                }
            }
        }
    }

    /// Re-read a CronJob after a conflict. `None` if it was deleted meanwhile;
    /// the deletion triggers its own reconcile.
    async fn refetch(&self, cron_key: &ObjectKey) -> Result<Option<CronJob>, ReconcileError> {
        match self.cluster.get_cron_job(cron_key).await {
            Ok(fresh) => Ok(Some(fresh)),
            Err(ClusterError::NotFound(_)) => {
                info!(cron_job = %cron_key.name, "cron job deleted during update");
                Ok(None)
            }
            Err(e) => Err(ReconcileError::FetchCronJob {
                key: cron_key.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod tests;
