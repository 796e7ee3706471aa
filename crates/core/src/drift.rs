// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift between a desired and an observed CronJob.
//!
//! Only the fields the controller manages are compared. Everything else on
//! the observed object (server defaults, labels, status, resourceVersion)
//! belongs to the cluster and is preserved when the desired fields are
//! written back.

use k8s_openapi::api::batch::v1::CronJob;
use k8s_openapi::api::core::v1::{Container, PodSpec};
use std::fmt;

/// Managed fields that differ between desired and observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronJobDrift {
    pub fields: Vec<&'static str>,
}

impl fmt::Display for CronJobDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields.join(","))
    }
}

fn pod_spec(cron_job: &CronJob) -> Option<&PodSpec> {
    cron_job
        .spec
        .as_ref()?
        .job_template
        .spec
        .as_ref()?
        .template
        .spec
        .as_ref()
}

fn pod_spec_mut(cron_job: &mut CronJob) -> &mut PodSpec {
    cron_job
        .spec
        .get_or_insert_with(Default::default)
        .job_template
        .spec
        .get_or_insert_with(Default::default)
        .template
        .spec
        .get_or_insert_with(Default::default)
}

fn first_container(cron_job: &CronJob) -> Option<&Container> {
    pod_spec(cron_job)?.containers.first()
}

/// Compare the managed fields of `desired` against `observed`.
///
/// An absent command and an empty one are equivalent, since the API server
/// drops empty lists.
pub fn detect_drift(desired: &CronJob, observed: &CronJob) -> Option<CronJobDrift> {
    let mut fields = Vec::new();

    let schedule = |c: &CronJob| c.spec.as_ref().map(|s| s.schedule.clone());
    if schedule(desired) != schedule(observed) {
        fields.push("schedule");
    }

    let concurrency = |c: &CronJob| c.spec.as_ref().and_then(|s| s.concurrency_policy.clone());
    if concurrency(desired) != concurrency(observed) {
        fields.push("concurrencyPolicy");
    }

    let restart = |c: &CronJob| pod_spec(c).and_then(|p| p.restart_policy.clone());
    if restart(desired) != restart(observed) {
        fields.push("restartPolicy");
    }

    let want = first_container(desired);
    let have = first_container(observed);
    if want.map(|c| &c.name) != have.map(|c| &c.name) {
        fields.push("container.name");
    }
    if want.and_then(|c| c.image.as_ref()) != have.and_then(|c| c.image.as_ref()) {
        fields.push("container.image");
    }
    let command = |c: Option<&Container>| c.and_then(|c| c.command.clone()).unwrap_or_default();
    if command(want) != command(have) {
        fields.push("container.command");
    }
    if want.and_then(|c| c.image_pull_policy.as_ref())
        != have.and_then(|c| c.image_pull_policy.as_ref())
    {
        fields.push("container.imagePullPolicy");
    }

    (!fields.is_empty()).then_some(CronJobDrift { fields })
}

/// Write the managed fields of `desired` onto `observed`.
///
/// The observed object's metadata is kept, so the result carries the
/// resourceVersion the update is conditioned on.
pub fn apply_desired(mut observed: CronJob, desired: &CronJob) -> CronJob {
    if let Some(want) = desired.spec.as_ref() {
        let spec = observed.spec.get_or_insert_with(Default::default);
        spec.schedule = want.schedule.clone();
        spec.concurrency_policy = want.concurrency_policy.clone();
    }

    if let Some(want) = pod_spec(desired) {
        let pod = pod_spec_mut(&mut observed);
        pod.restart_policy = want.restart_policy.clone();

        if let Some(want) = want.containers.first() {
            match pod.containers.first_mut() {
                Some(have) => {
                    have.name = want.name.clone();
                    have.image = want.image.clone();
                    have.command = want.command.clone();
                    have.image_pull_policy = want.image_pull_policy.clone();
                }
                None => pod.containers.push(want.clone()),
            }
        }
    }

    observed
}

#[cfg(test)]
#[path = "drift_tests.rs"]
mod tests;
