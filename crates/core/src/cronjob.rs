// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived CronJob construction.
//!
//! [`build_cron_job`] is a pure function from a [`Job`] declaration to the
//! `batch/v1` CronJob that realizes it. It performs no validation: an empty
//! schedule or image is passed through as-is and left to API admission.

use k8s_openapi::api::batch::v1::{CronJob, CronJobSpec, JobSpec as BatchJobSpec, JobTemplateSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use kube::Resource;
use sha2::{Digest, Sha256};

use crate::job::Job;

/// Name every derived CronJob receives under [`NamingStrategy::Fixed`] by default.
pub const DEFAULT_FIXED_NAME: &str = "jobop";

/// Overlapping runs are skipped while a previous run is still active.
pub const CONCURRENCY_POLICY: &str = "Forbid";

/// Pods of each run are never restarted in place.
pub const RESTART_POLICY: &str = "Never";

/// Images are pulled on every run so moving tags take effect.
pub const IMAGE_PULL_POLICY: &str = "Always";

/// CronJob names are capped at 52 characters so generated Job names fit.
const MAX_CRON_JOB_NAME_LEN: usize = 52;

/// Length of the hash suffix appended to truncated names.
const NAME_HASH_LEN: usize = 8;

/// How a declaration's name maps to its derived CronJob's name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamingStrategy {
    /// One CronJob per Job, named after the Job.
    #[default]
    PerJob,
    /// Every Job in a namespace shares one CronJob with this literal name.
    ///
    /// Kept for parity with deployments created before per-job naming. Two
    /// Jobs in the same namespace contend for the same CronJob.
    Fixed(String),
}

impl NamingStrategy {
    /// Legacy naming with the default literal name.
    pub fn fixed() -> Self {
        NamingStrategy::Fixed(DEFAULT_FIXED_NAME.to_string())
    }

    /// Derive the CronJob name for the Job named `job_name`.
    ///
    /// The name doubles as the container name, so it must be a DNS-1123
    /// label. Per-job names containing dots, or longer than the CronJob
    /// limit, are rewritten and suffixed with a hash of the full name, so
    /// distinct Jobs stay distinct.
    pub fn cron_job_name(&self, job_name: &str) -> String {
        match self {
            NamingStrategy::Fixed(name) => name.clone(),
            NamingStrategy::PerJob => per_job_name(job_name),
        }
    }
}

fn per_job_name(job_name: &str) -> String {
    let label = job_name.replace('.', "-");
    if label == job_name && label.len() <= MAX_CRON_JOB_NAME_LEN {
        return label;
    }

    let digest = format!("{:x}", Sha256::digest(job_name.as_bytes()));
    let keep = MAX_CRON_JOB_NAME_LEN - NAME_HASH_LEN - 1;
    let prefix: String = label.chars().take(keep).collect();
    format!(
        "{}-{}",
        prefix.trim_end_matches('-'),
        &digest[..NAME_HASH_LEN]
    )
}

/// Whether `name` can name both a CronJob and its container: a DNS-1123
/// label of at most 52 characters.
pub fn is_valid_cron_job_name(name: &str) -> bool {
    let alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    !name.is_empty()
        && name.len() <= MAX_CRON_JOB_NAME_LEN
        && name.chars().all(|c| alnum(c) || c == '-')
        && name.starts_with(alnum)
        && name.ends_with(alnum)
}

/// Build the CronJob that realizes `job` in `namespace`.
pub fn build_cron_job(namespace: &str, job: &Job, naming: &NamingStrategy) -> CronJob {
    let job_name = job.metadata.name.as_deref().unwrap_or_default();
    let name = naming.cron_job_name(job_name);

    let container = Container {
        name: name.clone(),
        image: Some(job.spec.image.clone()),
        command: (!job.spec.command.is_empty()).then(|| job.spec.command.clone()),
        image_pull_policy: Some(IMAGE_PULL_POLICY.to_string()),
        ..Default::default()
    };

    CronJob {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(namespace.to_string()),
            owner_references: Some(vec![controller_owner_ref(job)]),
            ..Default::default()
        },
        spec: Some(CronJobSpec {
            schedule: job.spec.schedule.clone(),
            concurrency_policy: Some(CONCURRENCY_POLICY.to_string()),
            job_template: JobTemplateSpec {
                metadata: None,
                spec: Some(BatchJobSpec {
                    template: PodTemplateSpec {
                        metadata: None,
                        spec: Some(PodSpec {
                            restart_policy: Some(RESTART_POLICY.to_string()),
                            containers: vec![container],
                            ..Default::default()
                        }),
                    },
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        status: None,
    }
}

/// Owner reference marking `job` as the controller of a derived object.
fn controller_owner_ref(job: &Job) -> OwnerReference {
    OwnerReference {
        api_version: Job::api_version(&()).into_owned(),
        kind: Job::kind(&()).into_owned(),
        name: job.metadata.name.clone().unwrap_or_default(),
        uid: job.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: None,
    }
}

/// Whether `cron_job`'s controller owner is `job`.
pub fn is_controlled_by(cron_job: &CronJob, job: &Job) -> bool {
    let Some(uid) = job.metadata.uid.as_deref() else {
        return false;
    };
    cron_job
        .metadata
        .owner_references
        .iter()
        .flatten()
        .any(|owner| owner.controller == Some(true) && owner.uid == uid)
}

#[cfg(test)]
#[path = "cronjob_tests.rs"]
mod tests;
