//! Test helpers for behavioral specifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Returns the path to a binary, checking llvm-cov target directory first.
/// Falls back to resolving relative to the test binary itself when
/// CARGO_MANIFEST_DIR is stale.
fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug").join(name);
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }

    // The test binary lives at target/debug/deps/specs-<hash>
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Returns the path to the jobopd daemon binary.
pub fn jobopd_binary() -> PathBuf {
    binary_path("jobopd")
}

/// Run jobopd with `args` and a scrubbed `JOBOP_*` environment.
pub fn jobopd(args: &[&str]) -> Output {
    let mut cmd = Command::new(jobopd_binary());
    for (key, _) in std::env::vars() {
        if key.starts_with("JOBOP_") {
            cmd.env_remove(key);
        }
    }
    cmd.args(args).output().unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
