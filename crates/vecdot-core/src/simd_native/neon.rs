//! ARM NEON kernel for aarch64.
//!
//! NEON is always available on aarch64, so no runtime detection is needed.

/// ARM NEON dot product, 4 lanes per step.
///
/// # Safety
///
/// Caller must ensure `a.len() == b.len()` (enforced by public API assert).
/// Loads from `b` are bounded by `a.len()` only.
#[cfg(target_arch = "aarch64")]
#[inline]
pub(crate) unsafe fn dot_product_neon(a: &[f32], b: &[f32]) -> f32 {
    use std::arch::aarch64::*;

    debug_assert_eq!(a.len(), b.len());
    let len = a.len();
    let simd_len = len / 4;

    // SAFETY: NEON intrinsics are always safe on aarch64.
    let mut acc = unsafe { vdupq_n_f32(0.0) };

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    for i in 0..simd_len {
        let offset = i * 4;
        // SAFETY: offset + 4 <= len, vld1q_f32 handles unaligned loads safely on ARM64
        unsafe {
            let va = vld1q_f32(a_ptr.add(offset));
            let vb = vld1q_f32(b_ptr.add(offset));
            acc = vmlaq_f32(acc, va, vb);
        }
    }

    // Fold the high half onto the low half, then add the two remaining lanes.
    // SAFETY: register-only intrinsics, always safe on aarch64.
    let mut result = unsafe {
        let sum2 = vadd_f32(vget_low_f32(acc), vget_high_f32(acc));
        vget_lane_f32::<0>(sum2) + vget_lane_f32::<1>(sum2)
    };

    let base = simd_len * 4;
    for i in base..len {
        result += a[i] * b[i];
    }

    result
}
