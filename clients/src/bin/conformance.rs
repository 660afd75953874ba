//! `ldshape-conformance`: Validates emitted SHACL and vocabulary artifacts.
//!
//! Checks every `shacl_*.jsonld` and `vocab.jsonld` directly inside the
//! artifacts directory.
//!
//! **Usage:**
//! ```
//! ldshape-conformance [--artifacts <path>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use ldshape_clients::init_logging;
use ldshape_conformance::{run_all, Severity};

/// Run the ldshape artifact conformance suite.
#[derive(Parser)]
#[command(
    name = "ldshape-conformance",
    about = "Validate emitted SHACL and vocabulary artifacts"
)]
struct Args {
    /// Directory holding the artifacts (default: current directory).
    #[arg(long, default_value = ".")]
    artifacts: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let report = run_all(&args.artifacts)?;

    println!("ldshape Conformance Report");
    println!("==========================");
    println!();

    for result in &report.results {
        println!("[{}] {} - {}", result.severity, result.validator, result.message);
        for detail in &result.details {
            println!("       {detail}");
        }
    }

    let failed = report.count(Severity::Failure);
    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        report.count(Severity::Pass),
        report.count(Severity::Warning),
        failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
