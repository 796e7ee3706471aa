//! Daemon help and version specs
//!
//! Verify jobopd --help, --version, and related flags work without
//! loading a kubeconfig (no cluster access).

use crate::prelude::*;

#[test]
fn jobopd_version_flags_show_version() {
    for flag in ["--version", "-V", "-v"] {
        let output = jobopd(&[flag]);
        assert!(output.status.success(), "{flag} failed");
        let stdout = stdout(&output);
        assert_eq!(stdout.trim(), "jobopd 0.1.0", "{flag} printed: {stdout}");
    }
}

#[test]
fn jobopd_help_shows_usage() {
    let output = jobopd(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(
        stdout.contains("USAGE:"),
        "expected USAGE section, got: {stdout}"
    );
    assert!(stdout.contains("--help"), "expected --help in output");
    assert!(stdout.contains("--version"), "expected --version in output");
    assert!(stdout.contains("--crd"), "expected --crd in output");
}

#[test]
fn jobopd_help_lists_environment() {
    let stdout = stdout(&jobopd(&["--help"]));
    for var in [
        "JOBOP_NAMESPACE",
        "JOBOP_NAMING",
        "JOBOP_DRIFT",
        "JOBOP_RECONCILE_TIMEOUT_SECS",
    ] {
        assert!(stdout.contains(var), "expected {var} in help, got: {stdout}");
    }
}

#[test]
fn jobopd_short_help_and_subcommand_show_usage() {
    for arg in ["-h", "help"] {
        let output = jobopd(&[arg]);
        assert!(output.status.success(), "{arg} failed");
        assert!(stdout(&output).contains("USAGE:"), "{arg} lacks usage");
    }
}

#[test]
fn jobopd_unknown_arg_fails() {
    let output = jobopd(&["--bogus"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(
        stderr.contains("unexpected argument '--bogus'"),
        "expected error message, got: {stderr}"
    );
    assert!(stdout(&output).is_empty());
}
