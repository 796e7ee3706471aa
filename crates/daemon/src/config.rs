// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration, read once at startup from `JOBOP_*` variables.

use std::time::Duration;

use jobop_core::{is_valid_cron_job_name, NamingStrategy, DEFAULT_FIXED_NAME};
use jobop_engine::{DriftPolicy, ReconcilerConfig};
use thiserror::Error;

use crate::env;

/// Retry delay for failures that carry no delay of their own.
pub const DEFAULT_ERROR_BACKOFF: Duration = Duration::from_secs(15);

/// Upper bound on a single reconcile, cluster calls included.
pub const DEFAULT_RECONCILE_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace to watch; `None` watches the whole cluster
    pub namespace: Option<String>,
    pub reconciler: ReconcilerConfig,
    pub error_backoff: Duration,
    pub reconcile_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: None,
            reconciler: ReconcilerConfig::default(),
            error_backoff: DEFAULT_ERROR_BACKOFF,
            reconcile_timeout: DEFAULT_RECONCILE_TIMEOUT,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        let reconciler = ReconcilerConfig {
            naming: naming()?,
            drift: env::parse::<DriftPolicy>(env::DRIFT)?.unwrap_or_default(),
            requeue_after: nonzero_secs(env::REQUEUE_AFTER_SECS)?
                .unwrap_or(defaults.reconciler.requeue_after),
            conflict_retries: env::parse::<u32>(env::CONFLICT_RETRIES)?
                .unwrap_or(defaults.reconciler.conflict_retries),
        };

        Ok(Self {
            namespace: env::var(env::NAMESPACE),
            reconciler,
            error_backoff: nonzero_secs(env::ERROR_BACKOFF_SECS)?
                .unwrap_or(defaults.error_backoff),
            reconcile_timeout: nonzero_secs(env::RECONCILE_TIMEOUT_SECS)?
                .unwrap_or(defaults.reconcile_timeout),
        })
    }
}

fn naming() -> Result<NamingStrategy, ConfigError> {
    let Some(mode) = env::var(env::NAMING) else {
        return Ok(NamingStrategy::default());
    };
    match mode.to_ascii_lowercase().as_str() {
        "per-job" => Ok(NamingStrategy::PerJob),
        "fixed" => {
            let name = env::var(env::FIXED_NAME).unwrap_or_else(|| DEFAULT_FIXED_NAME.to_string());
            if !is_valid_cron_job_name(&name) {
                return Err(ConfigError::Invalid {
                    var: env::FIXED_NAME,
                    value: name,
                    reason: "expected a DNS-1123 label of at most 52 characters".to_string(),
                });
            }
            Ok(NamingStrategy::Fixed(name))
        }
        _ => Err(ConfigError::Invalid {
            var: env::NAMING,
            value: mode,
            reason: "expected \"per-job\" or \"fixed\"".to_string(),
        }),
    }
}

/// Whole seconds in `var`, at least one when set.
fn nonzero_secs(var: &'static str) -> Result<Option<Duration>, ConfigError> {
    match env::secs(var)? {
        Some(d) if d.is_zero() => Err(ConfigError::Invalid {
            var,
            value: "0".to_string(),
            reason: "must be at least one second".to_string(),
        }),
        other => Ok(other),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
