// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registration with the kube-runtime controller loop.
//!
//! The loop watches Jobs and the CronJobs they own, serializes reconciles
//! per Job key, and schedules retries from the returned [`Action`].

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use jobop_adapters::{ClusterAdapter, KubeClusterAdapter, TracedCluster};
use jobop_core::{CronJob, Job, ObjectKey, ReconcileResult};
use jobop_engine::{ReconcileError, Reconciler};
use kube::runtime::controller::{Action, Controller};
use kube::runtime::watcher;
use kube::{Api, Client, ResourceExt};
use tracing::{debug, info, warn};

use crate::config::Config;

/// How often the reconcile counters are logged.
const METRICS_INTERVAL: Duration = Duration::from_secs(300);

/// Shared state handed to every reconcile.
pub struct Context<C> {
    pub reconciler: Reconciler<C>,
    pub error_backoff: Duration,
    pub reconcile_timeout: Duration,
}

impl<C: ClusterAdapter> Context<C> {
    pub fn new(reconciler: Reconciler<C>, config: &Config) -> Self {
        Self {
            reconciler,
            error_backoff: config.error_backoff,
            reconcile_timeout: config.reconcile_timeout,
        }
    }
}

/// Reconcile one Job under the configured timeout.
pub async fn reconcile<C: ClusterAdapter>(
    job: Arc<Job>,
    ctx: Arc<Context<C>>,
) -> Result<Action, ReconcileError> {
    let Some(key) = ObjectKey::from_resource(&*job) else {
        warn!(job = %job.name_any(), "job has no namespace; skipping");
        return Ok(Action::await_change());
    };

    let result = tokio::time::timeout(ctx.reconcile_timeout, ctx.reconciler.reconcile(&key))
        .await
        .map_err(|_| ReconcileError::Timeout {
            key: key.clone(),
            timeout: ctx.reconcile_timeout,
        })??;
    Ok(action_for(result))
}

/// Retry a failed reconcile after the error's own delay, or the backoff.
pub fn error_policy<C: ClusterAdapter>(
    job: Arc<Job>,
    err: &ReconcileError,
    ctx: Arc<Context<C>>,
) -> Action {
    let delay = retry_delay(err, ctx.error_backoff);
    warn!(
        job = %job.name_any(),
        error = %err,
        retry_in_secs = delay.as_secs(),
        "reconcile failed"
    );
    Action::requeue(delay)
}

pub(crate) fn action_for(result: ReconcileResult) -> Action {
    match result.requeue_after {
        Some(delay) => Action::requeue(delay),
        None if result.requeue => Action::requeue(Duration::ZERO),
        None => Action::await_change(),
    }
}

pub(crate) fn retry_delay(err: &ReconcileError, backoff: Duration) -> Duration {
    err.requeue_after().unwrap_or(backoff)
}

/// Watch Jobs and owned CronJobs until SIGTERM or Ctrl-C.
pub async fn run(client: Client, config: Config) {
    let (jobs, cron_jobs): (Api<Job>, Api<CronJob>) = match &config.namespace {
        Some(ns) => (
            Api::namespaced(client.clone(), ns),
            Api::namespaced(client.clone(), ns),
        ),
        None => (Api::all(client.clone()), Api::all(client.clone())),
    };

    let cluster = TracedCluster::new(KubeClusterAdapter::new(client));
    let reconciler = Reconciler::new(cluster, config.reconciler.clone());
    let ctx = Arc::new(Context::new(reconciler, &config));

    info!(
        namespace = config.namespace.as_deref().unwrap_or("*"),
        drift = ?config.reconciler.drift,
        naming = ?config.reconciler.naming,
        "starting job controller"
    );

    let reporter = spawn_metrics_reporter(Arc::clone(&ctx));

    Controller::new(jobs, watcher::Config::default())
        .owns(cron_jobs, watcher::Config::default())
        .shutdown_on_signal()
        .run(
            reconcile::<TracedCluster<KubeClusterAdapter>>,
            error_policy::<TracedCluster<KubeClusterAdapter>>,
            Arc::clone(&ctx),
        )
        .for_each(|outcome| async move {
            match outcome {
                Ok((job, action)) => debug!(job = %job, ?action, "reconciled"),
                Err(e) => debug!(error = %e, "controller event"),
            }
        })
        .await;

    reporter.abort();
    log_metrics(&ctx.reconciler);
    info!("job controller stopped");
}

fn spawn_metrics_reporter<C: ClusterAdapter>(
    ctx: Arc<Context<C>>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(METRICS_INTERVAL);
        // First tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            log_metrics(&ctx.reconciler);
        }
    })
}

fn log_metrics<C: ClusterAdapter>(reconciler: &Reconciler<C>) {
    let m = reconciler.metrics();
    info!(
        reconciles = m.reconciles,
        created = m.created,
        updated = m.updated,
        swallowed_update_errors = m.swallowed_update_errors,
        failures = m.failures,
        "reconcile metrics"
    );
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
