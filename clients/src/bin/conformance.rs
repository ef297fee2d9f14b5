//! `lookahead-conformance` — Validates the lookahead adder against reference addition.
//!
//! Runs the complete conformance suite:
//! - Worked scenarios across every strategy and schedule
//! - Combine operator algebra
//! - Tree/direct carry equivalence (exhaustive up to the configured width)
//! - Reference addition (exhaustive, plus 64/128-bit edge patterns)
//! - Idempotence and schedule independence
//!
//! **Usage:**
//! ```
//! lookahead-conformance [--max-exhaustive-width <n>] [-v...]
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

use std::process;

use anyhow::Result;
use clap::Parser;
use lookahead_clients::init_tracing;
use lookahead_conformance::{run_all, Severity, SuiteConfig, DEFAULT_EXHAUSTIVE_WIDTH};

/// Run the lookahead adder conformance suite.
#[derive(Parser)]
#[command(
    name = "lookahead-conformance",
    about = "Validate the lookahead adder against reference addition"
)]
struct Args {
    /// Check every operand pair of every width up to this one.
    #[arg(long, default_value_t = DEFAULT_EXHAUSTIVE_WIDTH)]
    max_exhaustive_width: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let report = run_all(&SuiteConfig {
        max_exhaustive_width: args.max_exhaustive_width,
    })?;

    println!("Lookahead Adder Conformance Report");
    println!("==================================");
    println!();

    for result in &report.results {
        println!("{result}");
    }

    let passed = report.count(Severity::Pass);
    let warned = report.count(Severity::Warning);
    let failed = report.count(Severity::Failure);

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed, warned, failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
