// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Job, JobSpec};

/// A stored Job as the API server would return it: namespaced, with a uid.
pub fn job(namespace: &str, name: &str, schedule: &str, image: &str, command: &[&str]) -> Job {
    let mut job = Job::new(
        name,
        JobSpec {
            schedule: schedule.to_string(),
            image: image.to_string(),
            command: command.iter().map(|s| s.to_string()).collect(),
        },
    );
    job.metadata.namespace = Some(namespace.to_string());
    job.metadata.uid = Some(format!("uid-{namespace}-{name}"));
    job
}

/// The Job used throughout the reconcile scenarios.
pub fn echo_job(namespace: &str, name: &str) -> Job {
    job(namespace, name, "*/5 * * * *", "busybox", &["echo", "hi"])
}
