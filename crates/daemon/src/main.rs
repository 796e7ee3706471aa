// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jobop daemon (jobopd)
//!
//! Watches `Job` resources and keeps one owned `batch/v1` CronJob per Job.
//!
//! Architecture:
//! - Controller loop: kube-runtime watches Jobs and owned CronJobs
//! - Reconciler: converges one Job key per invocation through the cluster adapter

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;
mod controller;
mod env;

use jobop_core::Job;
use kube::CustomResourceExt;
use tracing::info;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before any config or cluster access
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("jobopd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            "--crd" => {
                println!("{}", serde_json::to_string_pretty(&Job::crd())?);
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                eprintln!("Usage: jobopd [--help | --version | --crd]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    let _log_guard = setup_logging();

    info!(version = env!("CARGO_PKG_VERSION"), "jobopd starting");
    let client = kube::Client::try_default().await?;
    controller::run(client, config).await;

    Ok(())
}

fn print_help() {
    println!("jobopd {}", env!("CARGO_PKG_VERSION"));
    println!("jobop daemon - reconciles Job resources into owned CronJobs");
    println!();
    println!("USAGE:");
    println!("    jobopd [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Print help information");
    println!("    -V, --version    Print version information");
    println!("        --crd        Print the Job CustomResourceDefinition as JSON");
    println!();
    println!("ENVIRONMENT:");
    println!("    {:<30}Namespace to watch (default: all)", env::NAMESPACE);
    println!("    {:<30}per-job | fixed (default: per-job)", env::NAMING);
    println!("    {:<30}CronJob name in fixed mode (default: jobop)", env::FIXED_NAME);
    println!("    {:<30}correct | ignore (default: correct)", env::DRIFT);
    println!("    {:<30}Retry delay after create failures (default: 60)", env::REQUEUE_AFTER_SECS);
    println!("    {:<30}Retry delay for other failures (default: 15)", env::ERROR_BACKOFF_SECS);
    println!("    {:<30}Update retries on conflict (default: 3)", env::CONFLICT_RETRIES);
    println!("    {:<30}Per-reconcile timeout (default: 30)", env::RECONCILE_TIMEOUT_SECS);
    println!("    {:<30}Log filter (default: info)", "RUST_LOG");
}

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    guard
}
