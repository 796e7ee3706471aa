// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{echo_job, job};
use proptest::prelude::*;

fn container(cron_job: &CronJob) -> &Container {
    &pod_spec(cron_job).containers[0]
}

fn pod_spec(cron_job: &CronJob) -> &PodSpec {
    cron_job
        .spec
        .as_ref()
        .and_then(|s| s.job_template.spec.as_ref())
        .and_then(|s| s.template.spec.as_ref())
        .unwrap()
}

#[test]
fn builds_expected_cron_job() {
    let job = echo_job("ns1", "nightly");
    let built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);

    let expected = CronJob {
        metadata: ObjectMeta {
            name: Some("nightly".to_string()),
            namespace: Some("ns1".to_string()),
            owner_references: Some(vec![OwnerReference {
                api_version: "cronjobs.example.com/v1".to_string(),
                kind: "Job".to_string(),
                name: "nightly".to_string(),
                uid: "uid-ns1-nightly".to_string(),
                controller: Some(true),
                block_owner_deletion: None,
            }]),
            ..Default::default()
        },
        spec: Some(CronJobSpec {
            schedule: "*/5 * * * *".to_string(),
            concurrency_policy: Some("Forbid".to_string()),
            job_template: JobTemplateSpec {
                metadata: None,
                spec: Some(BatchJobSpec {
                    template: PodTemplateSpec {
                        metadata: None,
                        spec: Some(PodSpec {
                            restart_policy: Some("Never".to_string()),
                            containers: vec![Container {
                                name: "nightly".to_string(),
                                image: Some("busybox".to_string()),
                                command: Some(vec!["echo".to_string(), "hi".to_string()]),
                                image_pull_policy: Some("Always".to_string()),
                                ..Default::default()
                            }],
                            ..Default::default()
                        }),
                    },
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        status: None,
    };

    similar_asserts::assert_eq!(built, expected);
}

#[test]
fn owner_reference_mirrors_job() {
    let job = echo_job("ns1", "nightly");
    let built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);

    let owners = built.metadata.owner_references.unwrap();
    assert_eq!(owners.len(), 1);
    let owner = &owners[0];
    assert_eq!(owner.api_version, Job::api_version(&()));
    assert_eq!(owner.kind, Job::kind(&()));
    assert_eq!(Some(owner.name.as_str()), job.metadata.name.as_deref());
    assert_eq!(Some(owner.uid.as_str()), job.metadata.uid.as_deref());
    assert_eq!(owner.controller, Some(true));
}

#[test]
fn namespace_comes_from_argument() {
    let job = echo_job("ns1", "nightly");
    let built = build_cron_job("other", &job, &NamingStrategy::PerJob);
    assert_eq!(built.metadata.namespace.as_deref(), Some("other"));
}

#[test]
fn fixed_naming_names_cron_job_and_container() {
    let job = echo_job("ns1", "nightly");
    let built = build_cron_job("ns1", &job, &NamingStrategy::fixed());

    assert_eq!(built.metadata.name.as_deref(), Some("jobop"));
    assert_eq!(container(&built).name, "jobop");
    // Owner still points at the declaring Job
    assert_eq!(built.metadata.owner_references.unwrap()[0].name, "nightly");
}

#[test]
fn empty_inputs_pass_through() {
    let job = job("ns1", "blank", "", "", &[]);
    let built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);

    assert_eq!(built.spec.as_ref().unwrap().schedule, "");
    assert_eq!(container(&built).image.as_deref(), Some(""));
    assert_eq!(container(&built).command, None);
    assert_eq!(pod_spec(&built).restart_policy.as_deref(), Some("Never"));
}

#[test]
fn missing_uid_yields_empty_owner_uid() {
    let mut job = echo_job("ns1", "nightly");
    job.metadata.uid = None;
    let built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);

    assert_eq!(built.metadata.owner_references.unwrap()[0].uid, "");
}

#[test]
fn controlled_by_matching_uid() {
    let job = echo_job("ns1", "nightly");
    let built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);

    assert!(is_controlled_by(&built, &job));
    assert!(!is_controlled_by(&built, &echo_job("ns1", "other")));
}

#[test]
fn not_controlled_without_owner_references() {
    let job = echo_job("ns1", "nightly");
    let mut built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);
    built.metadata.owner_references = None;

    assert!(!is_controlled_by(&built, &job));
}

#[test]
fn non_controller_owner_does_not_count() {
    let job = echo_job("ns1", "nightly");
    let mut built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);
    if let Some(owners) = built.metadata.owner_references.as_mut() {
        owners[0].controller = Some(false);
    }

    assert!(!is_controlled_by(&built, &job));
}

#[yare::parameterized(
    short    = { "nightly",   "nightly" },
    hyphens  = { "db-backup", "db-backup" },
    at_limit = { "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz", "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz" },
)]
fn per_job_name_is_identity_within_limit(job_name: &str, expected: &str) {
    assert_eq!(NamingStrategy::PerJob.cron_job_name(job_name), expected);
}

#[yare::parameterized(
    one_dot   = { "backup.daily" },
    many_dots = { "team.db.backup" },
    long_dots = { "a.bcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyzabc" },
)]
fn dotted_per_job_name_becomes_label(job_name: &str) {
    let name = NamingStrategy::PerJob.cron_job_name(job_name);

    assert!(!name.contains('.'), "got {name}");
    assert!(is_valid_cron_job_name(&name), "got {name}");
    assert_ne!(name, job_name.replace('.', "-"));
}

#[test]
fn dotted_job_builds_valid_container_name() {
    let job = echo_job("ns1", "backup.daily");
    let built = build_cron_job("ns1", &job, &NamingStrategy::PerJob);

    let name = built.metadata.name.clone().unwrap();
    assert!(name.starts_with("backup-daily-"), "got {name}");
    assert_eq!(container(&built).name, name);
    assert!(is_valid_cron_job_name(&container(&built).name));
    // Owner keeps the Job's own name
    assert_eq!(
        built.metadata.owner_references.unwrap()[0].name,
        "backup.daily"
    );
}

#[test]
fn dotted_and_hyphenated_jobs_do_not_collide() {
    assert_ne!(
        NamingStrategy::PerJob.cron_job_name("backup.daily"),
        NamingStrategy::PerJob.cron_job_name("backup-daily")
    );
}

#[yare::parameterized(
    simple     = { "jobop", true },
    hyphenated = { "nightly-runner", true },
    digits     = { "0day", true },
    at_limit   = { "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz", true },
    empty      = { "", false },
    dotted     = { "backup.daily", false },
    uppercase  = { "Nightly", false },
    leading    = { "-nightly", false },
    trailing   = { "nightly-", false },
    underscore = { "night_ly", false },
    too_long   = { "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyza", false },
)]
fn cron_job_name_validity(name: &str, valid: bool) {
    assert_eq!(is_valid_cron_job_name(name), valid);
}

#[test]
fn long_per_job_name_is_truncated_with_hash() {
    let long = "a".repeat(80);
    let name = NamingStrategy::PerJob.cron_job_name(&long);

    assert_eq!(name.len(), 52);
    assert!(name.starts_with(&"a".repeat(43)));
    assert_eq!(name.as_bytes()[43], b'-');
}

#[test]
fn fixed_name_ignores_job_name() {
    let naming = NamingStrategy::Fixed("shared".to_string());
    assert_eq!(naming.cron_job_name("a"), "shared");
    assert_eq!(naming.cron_job_name("b"), "shared");
}

proptest! {
    #[test]
    fn per_job_names_fit_and_are_stable(name in "[a-z0-9][a-z0-9-]{0,252}") {
        let first = NamingStrategy::PerJob.cron_job_name(&name);
        let second = NamingStrategy::PerJob.cron_job_name(&name);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.len() <= 52);
        prop_assert!(!first.is_empty());
    }

    #[test]
    fn subdomain_job_names_map_to_valid_labels(
        name in "[a-z0-9]([a-z0-9.-]{0,200}[a-z0-9])?",
    ) {
        let derived = NamingStrategy::PerJob.cron_job_name(&name);
        prop_assert!(is_valid_cron_job_name(&derived), "{} -> {}", name, derived);
    }

    #[test]
    fn distinct_jobs_get_distinct_names(
        a in "[a-z0-9][a-z0-9-]{0,120}",
        b in "[a-z0-9][a-z0-9-]{0,120}",
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(
            NamingStrategy::PerJob.cron_job_name(&a),
            NamingStrategy::PerJob.cron_job_name(&b)
        );
    }
}
