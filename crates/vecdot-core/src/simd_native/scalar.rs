//! Scalar fallback for the dot product.
//!
//! Serves as:
//! - The kernel on targets without a supported vector unit
//! - The reference implementation the SIMD kernels are tested against

/// Sequential dot product, one accumulator in index order.
///
/// # Panics
///
/// Panics if `a.len() != b.len()`.
#[inline]
#[must_use]
pub fn dot_product_scalar(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    let mut sum = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x * y;
    }
    sum
}
