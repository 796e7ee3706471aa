//! Behavioral specifications for the jobopd binary.
//!
//! These tests are black-box: they invoke the daemon binary and verify
//! stdout, stderr, and exit codes. None of them reach a cluster.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// daemon/
#[path = "specs/daemon/crd.rs"]
mod daemon_crd;
#[path = "specs/daemon/help.rs"]
mod daemon_help;
