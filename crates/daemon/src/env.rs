// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::str::FromStr;
use std::time::Duration;

use crate::config::ConfigError;

pub const NAMESPACE: &str = "JOBOP_NAMESPACE";
pub const NAMING: &str = "JOBOP_NAMING";
pub const FIXED_NAME: &str = "JOBOP_FIXED_NAME";
pub const DRIFT: &str = "JOBOP_DRIFT";
pub const REQUEUE_AFTER_SECS: &str = "JOBOP_REQUEUE_AFTER_SECS";
pub const ERROR_BACKOFF_SECS: &str = "JOBOP_ERROR_BACKOFF_SECS";
pub const CONFLICT_RETRIES: &str = "JOBOP_CONFLICT_RETRIES";
pub const RECONCILE_TIMEOUT_SECS: &str = "JOBOP_RECONCILE_TIMEOUT_SECS";

/// Non-empty, trimmed value of `var`
pub fn var(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse `var` with `FromStr`; unset means `None`, garbage is an error
pub fn parse<T>(var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = self::var(var) else {
        return Ok(None);
    };
    value
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        })
}

/// Whole seconds in `var`
pub fn secs(var: &'static str) -> Result<Option<Duration>, ConfigError> {
    Ok(parse::<u64>(var)?.map(Duration::from_secs))
}
