// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Job` custom resource: a user's declaration of a recurring workload.
//!
//! A `Job` is read-only to the controller. Its spec is mirrored into an
//! owned `batch/v1` CronJob by [`crate::build_cron_job`].

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Desired state of a recurring workload.
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "cronjobs.example.com",
    version = "v1",
    kind = "Job",
    singular = "job",
    plural = "jobs",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// The schedule in Cron format, e.g. `*/5 * * * *`.
    pub schedule: String,

    /// Container image reference to run on each tick.
    pub image: String,

    /// Entrypoint for the container, passed verbatim.
    #[serde(default)]
    pub command: Vec<String>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
