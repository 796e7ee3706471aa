// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobop-core: resource model for the jobop controller

pub mod cronjob;
pub mod drift;
pub mod job;
pub mod key;
pub mod reconcile;

pub use cronjob::{
    build_cron_job, is_controlled_by, is_valid_cron_job_name, NamingStrategy, DEFAULT_FIXED_NAME,
};
pub use drift::{apply_desired, detect_drift, CronJobDrift};
pub use job::{Job, JobSpec};
pub use key::ObjectKey;
pub use reconcile::{ReconcileResult, DEFAULT_REQUEUE_AFTER};

// Re-exported so downstream crates name the derived resource through one path
pub use k8s_openapi::api::batch::v1::CronJob;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
