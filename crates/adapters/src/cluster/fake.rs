// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake cluster adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use jobop_core::{CronJob, Job, ObjectKey};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Recorded cluster call
#[derive(Debug, Clone)]
pub enum ClusterCall {
    GetJob { key: ObjectKey },
    GetCronJob { key: ObjectKey },
    CreateCronJob { cron_job: Box<CronJob> },
    UpdateCronJob { cron_job: Box<CronJob> },
}

impl ClusterCall {
    /// Whether the call writes to the store
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            ClusterCall::CreateCronJob { .. } | ClusterCall::UpdateCronJob { .. }
        )
    }
}

/// Operation selector for error injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusterOp {
    GetJob,
    GetCronJob,
    CreateCronJob,
    UpdateCronJob,
}

#[derive(Default)]
struct FakeClusterState {
    jobs: HashMap<ObjectKey, Job>,
    cron_jobs: HashMap<ObjectKey, CronJob>,
    calls: Vec<ClusterCall>,
    /// Scripted outcomes per operation; `None` lets the call through
    script: HashMap<ClusterOp, VecDeque<Option<ClusterError>>>,
    next_version: u64,
}

impl FakeClusterState {
    fn take_failure(&mut self, op: ClusterOp) -> Option<ClusterError> {
        self.script.get_mut(&op)?.pop_front().flatten()
    }

    fn bump_version(&mut self) -> String {
        self.next_version += 1;
        self.next_version.to_string()
    }
}

/// In-memory cluster store with optimistic concurrency.
///
/// Creates assign a uid and resourceVersion; updates must carry the current
/// resourceVersion (or none) and bump it. Scripted outcomes are consumed one
/// per call, before the store is consulted.
#[derive(Clone, Default)]
pub struct FakeClusterAdapter {
    inner: Arc<Mutex<FakeClusterState>>,
}

fn cron_job_key(cron_job: &CronJob) -> Result<ObjectKey, ClusterError> {
    ObjectKey::from_resource(cron_job)
        .ok_or_else(|| ClusterError::Invalid("cron job needs a name and namespace".to_string()))
}

impl FakeClusterAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a Job, filling namespace and uid if missing
    pub fn add_job(&self, namespace: &str, mut job: Job) -> Job {
        job.metadata.namespace = Some(namespace.to_string());
        if job.metadata.uid.is_none() {
            job.metadata.uid = Some(uuid::Uuid::new_v4().to_string());
        }
        let key = ObjectKey::new(namespace, job.metadata.name.clone().unwrap_or_default());
        self.inner.lock().jobs.insert(key, job.clone());
        job
    }

    /// Remove a Job, as a user delete would
    pub fn remove_job(&self, key: &ObjectKey) {
        self.inner.lock().jobs.remove(key);
    }

    /// Store a CronJob as-is, bypassing call recording
    pub fn add_cron_job(&self, mut cron_job: CronJob) -> CronJob {
        let mut inner = self.inner.lock();
        if cron_job.metadata.resource_version.is_none() {
            cron_job.metadata.resource_version = Some(inner.bump_version());
        }
        if let Ok(key) = cron_job_key(&cron_job) {
            inner.cron_jobs.insert(key, cron_job.clone());
        }
        cron_job
    }

    /// Mutate a stored CronJob out of band, as another writer would
    pub fn touch_cron_job(&self, key: &ObjectKey) {
        let mut inner = self.inner.lock();
        let version = inner.bump_version();
        if let Some(cron_job) = inner.cron_jobs.get_mut(key) {
            cron_job.metadata.resource_version = Some(version);
        }
    }

    /// Get a stored CronJob
    pub fn cron_job(&self, key: &ObjectKey) -> Option<CronJob> {
        self.inner.lock().cron_jobs.get(key).cloned()
    }

    /// Number of stored CronJobs
    pub fn cron_job_count(&self) -> usize {
        self.inner.lock().cron_jobs.len()
    }

    /// Fail the next call of `op` with `err`; repeated calls queue up
    pub fn fail_next(&self, op: ClusterOp, err: ClusterError) {
        self.inner
            .lock()
            .script
            .entry(op)
            .or_default()
            .push_back(Some(err));
    }

    /// Let the next call of `op` through, ahead of any queued failures
    pub fn pass_next(&self, op: ClusterOp) {
        self.inner.lock().script.entry(op).or_default().push_back(None);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ClusterCall> {
        self.inner.lock().calls.clone()
    }

    /// Recorded creates and updates
    pub fn mutating_calls(&self) -> Vec<ClusterCall> {
        self.calls().into_iter().filter(|c| c.is_mutating()).collect()
    }

    /// Forget recorded calls, keeping stored objects
    pub fn clear_calls(&self) {
        self.inner.lock().calls.clear();
    }
}

#[async_trait]
impl ClusterAdapter for FakeClusterAdapter {
    async fn get_job(&self, key: &ObjectKey) -> Result<Job, ClusterError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ClusterCall::GetJob { key: key.clone() });

        if let Some(err) = inner.take_failure(ClusterOp::GetJob) {
            return Err(err);
        }
        inner
            .jobs
            .get(key)
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(format!("job {key}")))
    }

    async fn get_cron_job(&self, key: &ObjectKey) -> Result<CronJob, ClusterError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ClusterCall::GetCronJob { key: key.clone() });

        if let Some(err) = inner.take_failure(ClusterOp::GetCronJob) {
            return Err(err);
        }
        inner
            .cron_jobs
            .get(key)
            .cloned()
            .ok_or_else(|| ClusterError::NotFound(format!("cron job {key}")))
    }

    async fn create_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ClusterCall::CreateCronJob {
            cron_job: Box::new(cron_job.clone()),
        });

        if let Some(err) = inner.take_failure(ClusterOp::CreateCronJob) {
            return Err(err);
        }
        let key = cron_job_key(cron_job)?;
        if inner.cron_jobs.contains_key(&key) {
            return Err(ClusterError::AlreadyExists(format!("cron job {key}")));
        }

        let mut stored = cron_job.clone();
        stored.metadata.uid = Some(uuid::Uuid::new_v4().to_string());
        stored.metadata.resource_version = Some(inner.bump_version());
        inner.cron_jobs.insert(key, stored.clone());
        Ok(stored)
    }

    async fn update_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError> {
        let mut inner = self.inner.lock();
        inner.calls.push(ClusterCall::UpdateCronJob {
            cron_job: Box::new(cron_job.clone()),
        });

        if let Some(err) = inner.take_failure(ClusterOp::UpdateCronJob) {
            return Err(err);
        }
        let key = cron_job_key(cron_job)?;
        let current = inner
            .cron_jobs
            .get(&key)
            .ok_or_else(|| ClusterError::NotFound(format!("cron job {key}")))?;

        let expected = cron_job.metadata.resource_version.as_deref();
        if expected.is_some() && expected != current.metadata.resource_version.as_deref() {
            return Err(ClusterError::Conflict(format!(
                "cron job {key} has been modified"
            )));
        }

        let mut stored = cron_job.clone();
        stored.metadata.uid = current.metadata.uid.clone();
        stored.metadata.resource_version = Some(inner.bump_version());
        inner.cron_jobs.insert(key, stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
