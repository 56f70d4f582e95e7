//! Runtime SIMD level detection and dispatch wiring.
//!
//! This module provides:
//! - `SimdLevel` enum for representing detected SIMD capability
//! - `simd_level()` for cached runtime detection
//! - `warmup_simd_cache()` for eliminating cold-start latency
//! - The public dot product entry points that route to ISA-specific kernels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scalar;
use crate::error::{Error, Result};

// =============================================================================
// Cached SIMD Level Detection
// =============================================================================

/// SIMD capability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimdLevel {
    /// AVX available (x86 / x86_64 only).
    Avx,
    /// NEON available (aarch64, always true).
    Neon,
    /// Scalar fallback.
    Scalar,
}

impl SimdLevel {
    /// Every level, best first.
    pub const ALL: [SimdLevel; 3] = [SimdLevel::Avx, SimdLevel::Neon, SimdLevel::Scalar];

    /// Human-readable architecture label printed in benchmark reports.
    #[must_use]
    pub const fn arch_name(self) -> &'static str {
        match self {
            Self::Avx => "AVX (x86/x64)",
            Self::Neon => "NEON (ARM/ARM64)",
            Self::Scalar => "Scalar (No SIMD)",
        }
    }

    /// Returns `true` if the current CPU can execute this level's kernel.
    #[must_use]
    pub fn is_available(self) -> bool {
        match self {
            Self::Avx => avx_detected(),
            Self::Neon => cfg!(target_arch = "aarch64"),
            Self::Scalar => true,
        }
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.arch_name())
    }
}

impl FromStr for SimdLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avx" => Ok(Self::Avx),
            "neon" => Ok(Self::Neon),
            "scalar" => Ok(Self::Scalar),
            other => Err(Error::InvalidConfig(format!(
                "unknown kernel '{other}' (expected avx, neon or scalar)"
            ))),
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn avx_detected() -> bool {
    is_x86_feature_detected!("avx")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn avx_detected() -> bool {
    false
}

/// Cached SIMD level - detected once at first use.
static SIMD_LEVEL: std::sync::OnceLock<SimdLevel> = std::sync::OnceLock::new();

/// Detects the best available SIMD level for the current CPU.
fn detect_simd_level() -> SimdLevel {
    let level = SimdLevel::ALL
        .into_iter()
        .find(|level| level.is_available())
        .unwrap_or(SimdLevel::Scalar);
    tracing::debug!(?level, arch = level.arch_name(), "SIMD level detected");
    level
}

/// Returns the cached SIMD capability level.
#[inline]
#[must_use]
pub fn simd_level() -> SimdLevel {
    *SIMD_LEVEL.get_or_init(detect_simd_level)
}

/// Architecture label of the kernel `dot_product_native` dispatches to.
#[inline]
#[must_use]
pub fn arch_name() -> &'static str {
    simd_level().arch_name()
}

/// Levels this CPU can run, best first. Always ends with `Scalar`.
#[must_use]
pub fn available_levels() -> Vec<SimdLevel> {
    SimdLevel::ALL
        .into_iter()
        .filter(|level| level.is_available())
        .collect()
}

/// Warms up SIMD caches to eliminate cold-start latency.
///
/// Call this before timing so the first measured call pays neither the
/// feature detection nor cold instruction caches.
///
/// # Example
///
/// ```
/// use vecdot_core::simd_native::warmup_simd_cache;
/// warmup_simd_cache();
/// ```
#[inline]
pub fn warmup_simd_cache() {
    let _ = simd_level();
    let warmup_size = 768;
    let a: Vec<f32> = vec![0.01; warmup_size];
    let b: Vec<f32> = vec![0.01; warmup_size];
    for _ in 0..3 {
        let _ = dot_product_native(&a, &b);
    }
}

// =============================================================================
// Public API with cached dispatch
// =============================================================================

/// Dot product with automatic dispatch to best available SIMD.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[allow(clippy::inline_always)]
#[inline(always)]
#[must_use]
pub fn dot_product_native(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    run_kernel(simd_level(), a, b)
}

/// Dot product through one specific kernel.
///
/// Used to compare kernels against each other on the same CPU.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
pub fn dot_product_with(level: SimdLevel, a: &[f32], b: &[f32]) -> Result<f32> {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    if !level.is_available() {
        return Err(Error::UnsupportedKernel(level));
    }
    Ok(run_kernel(level, a, b))
}

/// Routes to the kernel for `level`. `level` must be available.
#[inline]
fn run_kernel(level: SimdLevel, a: &[f32], b: &[f32]) -> f32 {
    match level {
        // SAFETY: callers assert equal lengths, and `level` was checked with
        // `is_available` (AVX) or is guaranteed by the target (NEON).
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        SimdLevel::Avx => unsafe { super::dot_product_avx(a, b) },
        #[cfg(target_arch = "aarch64")]
        SimdLevel::Neon => unsafe { super::dot_product_neon(a, b) },
        _ => scalar::dot_product_scalar(a, b),
    }
}
