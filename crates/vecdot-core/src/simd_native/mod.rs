//! Native SIMD dot product kernels.
//!
//! Hand-written `core::arch` implementations for AVX (x86 / x86_64) and
//! ARM NEON (aarch64), with a scalar loop for every other target.
//!
//! # Module Structure
//!
//! - `scalar` — Sequential fallback and reference implementation
//! - `tail_unroll` — Remainder handling macro for the 8-lane loop
//! - `x86_avx` — AVX 8-wide kernel (x86 / x86_64 only)
//! - `neon` — NEON 4-wide kernel (aarch64 only)
//! - `dispatch` — Runtime level detection and dispatch wiring
#![allow(clippy::doc_markdown)] // Contains ISA/architecture nomenclature in docs.

pub mod scalar;
mod tail_unroll;

#[allow(unused_imports)]
pub(crate) use tail_unroll::sum_remainder_unrolled_8;

pub use scalar::dot_product_scalar;

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for SIMD unsafe blocks in this module tree.
// - Condition 1: All pointer arithmetic is derived from slice pointers with loop bounds
//   proving in-range access for each lane width.
// - Condition 2: Target-featured functions are called only after runtime feature checks
//   or on architectures where the feature is guaranteed.
// - Condition 3: Loads use `_mm256_loadu_ps` / `vld1q_f32`, which permit unaligned access.

// =============================================================================
// ISA kernel submodules
// =============================================================================

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86_avx;

#[cfg(target_arch = "aarch64")]
mod neon;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) use x86_avx::dot_product_avx;

#[cfg(target_arch = "aarch64")]
pub(crate) use neon::dot_product_neon;

// =============================================================================
// Dispatch module (public API)
// =============================================================================

mod dispatch;

pub use dispatch::{
    arch_name, available_levels, dot_product_native, dot_product_with, simd_level,
    warmup_simd_cache, SimdLevel,
};
