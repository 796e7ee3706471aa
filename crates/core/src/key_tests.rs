// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{Job, JobSpec};

#[test]
fn display_is_namespace_slash_name() {
    assert_eq!(ObjectKey::new("ns1", "nightly").to_string(), "ns1/nightly");
}

#[test]
fn from_resource_reads_metadata() {
    let mut job = Job::new("nightly", JobSpec::default());
    job.metadata.namespace = Some("ns1".to_string());

    assert_eq!(
        ObjectKey::from_resource(&job),
        Some(ObjectKey::new("ns1", "nightly"))
    );
}

#[test]
fn from_resource_without_namespace_is_none() {
    let job = Job::new("nightly", JobSpec::default());
    assert_eq!(ObjectKey::from_resource(&job), None);
}

#[test]
fn sibling_keeps_namespace() {
    let key = ObjectKey::new("ns1", "nightly");
    assert_eq!(key.sibling("jobop"), ObjectKey::new("ns1", "jobop"));
}
