//! Timing harness and benchmark report.
//!
//! A run resolves the kernel, generates the inputs, optionally warms the
//! kernel up, then times `runs` single invocations with [`Instant`]. The first
//! timed invocation is the headline measurement.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::simd_native::{dot_product_with, SimdLevel};
use crate::workload::{generate_pair, VectorPair};

/// Outcome of one benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    /// Architecture label of the kernel that ran.
    pub arch: &'static str,
    /// Kernel that ran.
    pub level: SimdLevel,
    /// Elements per operand.
    pub len: usize,
    /// Dot product computed by the first timed call.
    pub result: f32,
    /// Wall time of the first timed call.
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_ms")]
    pub elapsed: Duration,
    /// Wall time of every timed call, in order.
    #[serde(rename = "runs_ms", serialize_with = "serialize_ms_list")]
    pub runs: Vec<Duration>,
}

impl BenchReport {
    /// Headline time in milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed)
    }

    /// Fastest timed call.
    #[must_use]
    pub fn min(&self) -> Duration {
        self.runs.iter().copied().min().unwrap_or(self.elapsed)
    }

    /// Average over the timed calls.
    #[must_use]
    pub fn mean(&self) -> Duration {
        let Ok(count) = u32::try_from(self.runs.len()) else {
            return self.elapsed;
        };
        if count == 0 {
            return self.elapsed;
        }
        self.runs.iter().sum::<Duration>() / count
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Arch: {}", self.arch)?;
        write!(
            f,
            "Result = {}  time: {:.4} ms",
            self.result,
            self.elapsed_ms()
        )?;
        if self.runs.len() > 1 {
            write!(
                f,
                "\nRuns: {}  min: {:.4} ms  mean: {:.4} ms",
                self.runs.len(),
                duration_ms(self.min()),
                duration_ms(self.mean())
            )?;
        }
        Ok(())
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000.0
}

fn serialize_ms<S: Serializer>(
    d: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration_ms(*d))
}

fn serialize_ms_list<S: Serializer>(
    runs: &[Duration],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(runs.iter().map(|d| duration_ms(*d)))
}

/// Runs the benchmark described by `config`.
pub fn run(config: &BenchConfig) -> Result<BenchReport> {
    config.validate()?;
    let level = config.kernel.resolve()?;
    let pair = generate_pair(config.len, config.seed, config.low, config.high)?;
    run_on(level, &pair, config.warmup, config.runs)
}

/// Times `level` on prepared inputs.
///
/// `runs` of zero is treated as one.
pub fn run_on(
    level: SimdLevel,
    pair: &VectorPair,
    warmup: u32,
    runs: u32,
) -> Result<BenchReport> {
    tracing::info!(
        arch = level.arch_name(),
        len = pair.len(),
        warmup,
        runs,
        "starting dot product benchmark"
    );

    for _ in 0..warmup {
        let _ = black_box(dot_product_with(level, black_box(&pair.a), black_box(&pair.b))?);
    }

    let (result, elapsed) = time_once(level, pair)?;
    let mut timings = Vec::with_capacity(runs.max(1) as usize);
    timings.push(elapsed);
    for _ in 1..runs {
        let (_, t) = time_once(level, pair)?;
        timings.push(t);
    }

    let report = BenchReport {
        arch: level.arch_name(),
        level,
        len: pair.len(),
        result,
        elapsed,
        runs: timings,
    };
    tracing::info!(
        result = report.result,
        elapsed_ms = report.elapsed_ms(),
        "benchmark finished"
    );
    Ok(report)
}

fn time_once(level: SimdLevel, pair: &VectorPair) -> Result<(f32, Duration)> {
    let start = Instant::now();
    let result = dot_product_with(level, black_box(&pair.a), black_box(&pair.b))?;
    let elapsed = start.elapsed();
    Ok((black_box(result), elapsed))
}
