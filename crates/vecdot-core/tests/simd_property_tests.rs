//! Property-based equivalence tests for the dot product kernels.
//!
//! Every kernel the test machine can run is compared against the scalar
//! reference over randomized vectors and lane-width boundaries.

use proptest::{
    collection::vec,
    prelude::{prop_assert, prop_oneof, Just, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};
use vecdot_core::simd_native::{available_levels, dot_product_native, dot_product_scalar};
use vecdot_core::{dot_product_with, generate_pair};

const SIMD_PROP_CASES: u32 = 256;
const SIMD_PROP_MAX_SHRINK_ITERS: u32 = 2048;

// Envelope for non-associative f32 summation.
const DOT_ABS_TOLERANCE: f32 = 1.0e-4;
const DOT_REL_TOLERANCE: f32 = 2.0e-4;

fn bounded_dimension_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(0_usize),
        Just(1_usize),
        Just(3_usize),
        Just(4_usize),
        Just(5_usize),
        Just(7_usize),
        Just(8_usize),
        Just(9_usize),
        Just(15_usize),
        Just(16_usize),
        Just(17_usize),
        Just(63_usize),
        Just(64_usize),
        Just(65_usize),
        0_usize..=2048,
    ]
}

fn finite_vector_pair_strategy() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    bounded_dimension_strategy().prop_flat_map(|len| {
        let a = vec(-100.0_f32..100.0_f32, len);
        let b = vec(-100.0_f32..100.0_f32, len);
        (a, b)
    })
}

fn simd_proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: SIMD_PROP_CASES,
        max_shrink_iters: SIMD_PROP_MAX_SHRINK_ITERS,
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "simd-property-regressions",
        ))),
        ..ProptestConfig::default()
    }
}

/// Tolerance scaled by the magnitude of the summed terms, not the result,
/// since cancellation can make the result tiny while rounding error is not.
fn allowed_error(a: &[f32], b: &[f32]) -> f32 {
    let magnitude: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x * y).abs()).sum();
    DOT_ABS_TOLERANCE.max(DOT_REL_TOLERANCE * magnitude)
}

proptest! {
    #![proptest_config(simd_proptest_config())]

    #[test]
    fn prop_every_kernel_matches_scalar((a, b) in finite_vector_pair_strategy()) {
        let expected = dot_product_scalar(&a, &b);
        let allowed = allowed_error(&a, &b);
        for level in available_levels() {
            let actual = dot_product_with(level, &a, &b).unwrap();
            let delta = (actual - expected).abs();
            prop_assert!(
                delta <= allowed,
                "{:?} mismatch: actual={}, expected={}, delta={}, allowed={}",
                level, actual, expected, delta, allowed
            );
        }
    }

    #[test]
    fn prop_native_is_commutative((a, b) in finite_vector_pair_strategy()) {
        let ab = dot_product_native(&a, &b);
        let ba = dot_product_native(&b, &a);
        prop_assert!(ab.to_bits() == ba.to_bits(), "a.b={} b.a={}", ab, ba);
    }

    #[test]
    fn prop_generated_inputs_agree(len in 0_usize..5_000, seed in 0_u32..1_000) {
        let pair = generate_pair(len, seed, -1.0, 1.0).unwrap();
        let expected = dot_product_scalar(&pair.a, &pair.b);
        let actual = dot_product_native(&pair.a, &pair.b);
        let allowed = allowed_error(&pair.a, &pair.b);
        prop_assert!((actual - expected).abs() <= allowed);
    }
}
