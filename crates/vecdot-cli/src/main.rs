//! `vecdot` - times one f32 dot product on the best kernel this CPU offers.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vecdot_core::{bench, BenchConfig, KernelChoice, SimdLevel};

/// vecdot - single-precision dot product benchmark
#[derive(Parser, Debug)]
#[command(name = "vecdot")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML configuration file (overridden by VECDOT_* variables and flags)
    #[arg(short, long, env = "VECDOT_CONFIG")]
    config: Option<PathBuf>,

    /// Elements per input vector
    #[arg(short = 'n', long)]
    len: Option<usize>,

    /// Seed of the input generator
    #[arg(short, long)]
    seed: Option<u32>,

    /// Kernel to run
    #[arg(short, long, value_enum)]
    kernel: Option<KernelArg>,

    /// Untimed calls before measuring
    #[arg(long)]
    warmup: Option<u32>,

    /// Timed calls (the first one is reported as the headline time)
    #[arg(short, long)]
    runs: Option<u32>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List the kernels and whether this CPU supports them, then exit
    #[arg(long)]
    list_kernels: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KernelArg {
    Auto,
    Avx,
    Neon,
    Scalar,
}

impl From<KernelArg> for KernelChoice {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Auto => KernelChoice::Auto,
            KernelArg::Avx => KernelChoice::Force(SimdLevel::Avx),
            KernelArg::Neon => KernelChoice::Force(SimdLevel::Neon),
            KernelArg::Scalar => KernelChoice::Force(SimdLevel::Scalar),
        }
    }
}

impl Args {
    /// Applies explicit flags on top of the loaded configuration.
    fn apply(&self, config: &mut BenchConfig) {
        if let Some(len) = self.len {
            config.len = len;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(kernel) = self.kernel {
            config.kernel = kernel.into();
        }
        if let Some(warmup) = self.warmup {
            config.warmup = warmup;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn list_kernels() {
    let detected = vecdot_core::simd_level();
    for level in SimdLevel::ALL {
        let status = if level == detected {
            "selected"
        } else if level.is_available() {
            "available"
        } else {
            "unsupported"
        };
        println!("{:<8} {:<20} {}", KernelChoice::Force(level), level.arch_name(), status);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.list_kernels {
        list_kernels();
        return Ok(());
    }

    let mut config =
        BenchConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply(&mut config);
    tracing::debug!(?config, "effective configuration");

    let report = bench::run(&config).context("benchmark failed")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to encode report")?
        );
    } else {
        println!("{report}");
    }
    Ok(())
}
