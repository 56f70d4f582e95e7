//! AVX kernel for x86 and x86_64.
//!
//! 8-wide f32 multiply then add into a single accumulator, reduced with two
//! horizontal adds. Requires runtime AVX detection before calling.

#![allow(clippy::similar_names)]

use super::sum_remainder_unrolled_8;

/// AVX dot product.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX (enforced by `#[target_feature]` and runtime detection)
/// - `a.len() == b.len()` (enforced by public API assert)
#[target_feature(enable = "avx")]
#[inline]
pub(crate) unsafe fn dot_product_avx(a: &[f32], b: &[f32]) -> f32 {
    // SAFETY: Only called after runtime feature detection confirms AVX.
    // - `_mm256_loadu_ps` handles unaligned loads
    // - offset + 8 <= simd_len * 8 <= len for every load
    #[cfg(target_arch = "x86")]
    use std::arch::x86::*;
    #[cfg(target_arch = "x86_64")]
    use std::arch::x86_64::*;

    let len = a.len();
    let simd_len = len / 8;

    let mut acc = _mm256_setzero_ps();

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    for i in 0..simd_len {
        let offset = i * 8;
        let va = _mm256_loadu_ps(a_ptr.add(offset));
        let vb = _mm256_loadu_ps(b_ptr.add(offset));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(va, vb));
    }

    // [a0..a7] -> [a0+a4, a1+a5, a2+a6, a3+a7] -> two hadds -> lane 0
    let lo = _mm256_castps256_ps128(acc);
    let hi = _mm256_extractf128_ps(acc, 1);
    let sum128 = _mm_add_ps(lo, hi);
    let sum128 = _mm_hadd_ps(sum128, sum128);
    let sum128 = _mm_hadd_ps(sum128, sum128);
    let mut result = _mm_cvtss_f32(sum128);

    let base = simd_len * 8;
    let remainder = len - base;
    sum_remainder_unrolled_8!(a, b, base, remainder, result);

    result
}
