//! Benchmark configuration.
//!
//! Sources are layered with `figment`, lowest priority first:
//!
//! 1. Built-in defaults ([`BenchConfig::default`])
//! 2. An optional TOML file
//! 3. `VECDOT_*` environment variables (e.g. `VECDOT_LEN=4096`)
//!
//! Command-line flags are applied on top by the CLI.
//!
//! ```toml
//! len = 1000003
//! seed = 42
//! low = -1.0
//! high = 1.0
//! kernel = "auto"
//! warmup = 0
//! runs = 1
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simd_native::{simd_level, SimdLevel};
use crate::workload::UniformF32;

/// Default vector length. Prime, so the SIMD remainder path always runs.
pub const DEFAULT_LEN: usize = 1_000_003;
/// Default generator seed.
pub const DEFAULT_SEED: u32 = 42;
/// Default lower bound of sampled values (inclusive).
pub const DEFAULT_LOW: f32 = -1.0;
/// Default upper bound of sampled values (exclusive).
pub const DEFAULT_HIGH: f32 = 1.0;

/// Prefix of the environment variables read by [`BenchConfig::load`].
pub const ENV_PREFIX: &str = "VECDOT_";

/// Which kernel the benchmark runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum KernelChoice {
    /// Best kernel for this CPU.
    #[default]
    Auto,
    /// One specific kernel; fails if the CPU can't run it.
    Force(SimdLevel),
}

impl KernelChoice {
    /// Resolves the choice to a concrete, runnable level.
    pub fn resolve(self) -> Result<SimdLevel> {
        match self {
            Self::Auto => Ok(simd_level()),
            Self::Force(level) if level.is_available() => Ok(level),
            Self::Force(level) => {
                tracing::warn!(kernel = %level, "forced kernel not supported on this CPU");
                Err(Error::UnsupportedKernel(level))
            }
        }
    }
}

impl fmt::Display for KernelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Force(SimdLevel::Avx) => "avx",
            Self::Force(SimdLevel::Neon) => "neon",
            Self::Force(SimdLevel::Scalar) => "scalar",
        };
        f.pad(name)
    }
}

impl FromStr for KernelChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else {
            s.parse().map(Self::Force)
        }
    }
}

impl TryFrom<String> for KernelChoice {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<KernelChoice> for String {
    fn from(choice: KernelChoice) -> Self {
        choice.to_string()
    }
}

/// Benchmark parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Number of elements in each input vector.
    pub len: usize,
    /// Seed of the input generator.
    pub seed: u32,
    /// Lower bound of sampled values (inclusive).
    pub low: f32,
    /// Upper bound of sampled values (exclusive).
    pub high: f32,
    /// Kernel selection.
    pub kernel: KernelChoice,
    /// Untimed calls made before measuring.
    pub warmup: u32,
    /// Timed calls. The first one is the headline measurement.
    pub runs: u32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            seed: DEFAULT_SEED,
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
            kernel: KernelChoice::Auto,
            warmup: 0,
            runs: 1,
        }
    }
}

impl BenchConfig {
    /// Loads defaults, then `path` if given, then `VECDOT_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                return Err(Error::InvalidConfig(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "loading configuration file");
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that would make the benchmark meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.runs == 0 {
            return Err(Error::InvalidConfig("runs must be at least 1".to_string()));
        }
        UniformF32::new(self.low, self.high).map(|_| ())
    }
}
