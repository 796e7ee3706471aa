// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cluster adapter backed by the Kubernetes API

use super::{ClusterAdapter, ClusterError};
use async_trait::async_trait;
use jobop_core::{CronJob, Job, ObjectKey};
use kube::api::{Api, PostParams};
use kube::{Client, ResourceExt};

/// Talks to the API server through a shared kube client.
#[derive(Clone)]
pub struct KubeClusterAdapter {
    client: Client,
}

impl KubeClusterAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn jobs(&self, namespace: &str) -> Api<Job> {
        Api::namespaced(self.client.clone(), namespace)
    }

    fn cron_jobs(&self, namespace: &str) -> Api<CronJob> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

/// Namespace of an object about to be written.
fn target_namespace(cron_job: &CronJob) -> Result<String, ClusterError> {
    cron_job.namespace().ok_or_else(|| {
        ClusterError::Invalid(format!("cron job {} has no namespace", cron_job.name_any()))
    })
}

#[async_trait]
impl ClusterAdapter for KubeClusterAdapter {
    async fn get_job(&self, key: &ObjectKey) -> Result<Job, ClusterError> {
        Ok(self.jobs(&key.namespace).get(&key.name).await?)
    }

    async fn get_cron_job(&self, key: &ObjectKey) -> Result<CronJob, ClusterError> {
        Ok(self.cron_jobs(&key.namespace).get(&key.name).await?)
    }

    async fn create_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError> {
        let namespace = target_namespace(cron_job)?;
        Ok(self
            .cron_jobs(&namespace)
            .create(&PostParams::default(), cron_job)
            .await?)
    }

    async fn update_cron_job(&self, cron_job: &CronJob) -> Result<CronJob, ClusterError> {
        let namespace = target_namespace(cron_job)?;
        Ok(self
            .cron_jobs(&namespace)
            .replace(&cron_job.name_any(), &PostParams::default(), cron_job)
            .await?)
    }
}
