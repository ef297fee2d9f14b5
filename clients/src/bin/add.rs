//! `lookahead-add` — Adds two fixed-width binary numbers with a carry-lookahead adder.
//!
//! Operands are written most-significant bit first. The sum is printed with
//! the same width; the carry out of the top bit is dropped.
//!
//! **Usage:**
//! ```
//! lookahead-add --a <bits> --b <bits> [--carry-in] [--strategy direct|tree]
//!               [--serial | --grain <n>] [--width <n>] [--config <file>] [--dump] [-v...]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lookahead::{AdderConfig, CarryStrategy, Operand, Schedule};
use lookahead_clients::{format_bits, init_tracing};
use tracing::info;

/// Add two binary numbers with a carry-lookahead adder.
#[derive(Parser)]
#[command(
    name = "lookahead-add",
    about = "Add two fixed-width binary numbers with a carry-lookahead adder"
)]
struct Args {
    /// First operand, MSB first (e.g. 1010; `_` separators allowed).
    #[arg(long)]
    a: Operand,

    /// Second operand, same width as the first.
    #[arg(long)]
    b: Operand,

    /// Set the initial carry-in to 1.
    #[arg(long)]
    carry_in: bool,

    /// Carry resolution strategy: `direct` or `tree`.
    #[arg(long)]
    strategy: Option<CarryStrategy>,

    /// Evaluate on the calling thread only.
    #[arg(long, conflicts_with = "grain")]
    serial: bool,

    /// Smallest span forked onto the thread pool.
    #[arg(long)]
    grain: Option<usize>,

    /// Required operand width (default: the config file's, else the operands').
    #[arg(long)]
    width: Option<usize>,

    /// JSON adder configuration; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the propagate, generate and carry arrays before the sum.
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// The file config (or defaults) with command-line overrides applied.
    fn resolve_config(&self) -> Result<AdderConfig> {
        let mut config = match &self.config {
            Some(path) => AdderConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AdderConfig {
                width: self.a.width(),
                ..AdderConfig::default()
            },
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        if self.serial {
            config.schedule = Schedule::Serial;
        } else if let Some(grain) = self.grain {
            config.schedule = Schedule::Parallel { grain };
        }
        config.carry_in |= self.carry_in;
        config.validate().context("invalid adder configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.resolve_config()?;
    config
        .check_operands(&args.a, &args.b)
        .context("operands do not fit the configured adder")?;
    info!(
        width = config.width,
        strategy = %config.strategy,
        schedule = ?config.schedule,
        carry_in = config.carry_in,
        "adding"
    );

    let addition = config
        .adder()
        .add_traced(&args.a, &args.b, config.carry_in)
        .context("addition rejected")?;

    if args.dump {
        println!("Propagate:");
        println!("{}", format_bits(addition.leaves.iter().map(|pg| pg.propagate)));
        println!("Generate:");
        println!("{}", format_bits(addition.leaves.iter().map(|pg| pg.generate)));
        if let Some(tree) = &addition.tree {
            println!("Tree:");
            print!("{tree}");
        }
        println!("Carries:");
        println!("{}", format_bits(addition.carries.iter().copied()));
        println!("------ADDITION------");
        println!("a={}, b={}, c0={}", args.a, args.b, u8::from(config.carry_in));
    }

    println!("{}", addition.sum);
    Ok(())
}
