//! Reproducible input vectors for the benchmark.
//!
//! One MT19937 generator fills both vectors, drawing `a[i]` then `b[i]` for
//! each index, so a `(len, seed, low, high)` tuple always yields the same
//! pair of vectors bit for bit. Each value comes from a single 32-bit draw
//! mapped the way libstdc++'s `uniform_real_distribution<float>` maps it, so
//! seed 42 over `[-1, 1)` reproduces the classic `std::mt19937(42)` inputs.

use rand::distributions::Distribution;
use rand::Rng;
use rand_mt::Mt;

use crate::error::{Error, Result};

/// `2^-32`: turns one 32-bit draw into a value in `[0, 1]`.
const UNIT_SCALE: f32 = 1.0 / 4_294_967_296.0;
/// Largest `f32` below one.
const ONE_BELOW: f32 = 1.0 - f32::EPSILON / 2.0;

/// The two operands of one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPair {
    /// Left operand.
    pub a: Vec<f32>,
    /// Right operand.
    pub b: Vec<f32>,
}

impl VectorPair {
    /// Number of elements in each operand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.a.len()
    }

    /// Returns `true` if the operands have no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Uniform `f32` sampler over `[low, high)` using one 32-bit draw per value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformF32 {
    low: f32,
    high: f32,
    scale: f32,
}

impl UniformF32 {
    /// Builds a sampler for `[low, high)`.
    ///
    /// Both bounds and their difference must be finite, and `low < high`.
    pub fn new(low: f32, high: f32) -> Result<Self> {
        let scale = high - low;
        if !low.is_finite() || !high.is_finite() || low >= high || !scale.is_finite() {
            return Err(Error::InvalidRange { low, high });
        }
        Ok(Self { low, high, scale })
    }
}

impl Distribution<f32> for UniformF32 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let unit = (rng.next_u32() as f32 * UNIT_SCALE).min(ONE_BELOW);
        let value = unit * self.scale + self.low;
        // Rounding can land on `high` for some ranges.
        if value >= self.high {
            below(self.high)
        } else {
            value
        }
    }
}

/// Closest finite `f32` below `x`.
fn below(x: f32) -> f32 {
    if x > 0.0 {
        f32::from_bits(x.to_bits() - 1)
    } else if x < 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        -f32::from_bits(1)
    }
}

/// Generates `len` uniformly distributed values in `[low, high)` per operand.
pub fn generate_pair(len: usize, seed: u32, low: f32, high: f32) -> Result<VectorPair> {
    let dist = UniformF32::new(low, high)?;
    let mut rng = Mt::new(seed);

    let mut a = Vec::with_capacity(len);
    let mut b = Vec::with_capacity(len);
    for _ in 0..len {
        a.push(dist.sample(&mut rng));
        b.push(dist.sample(&mut rng));
    }

    tracing::debug!(len, seed, low, high, "generated input vectors");
    Ok(VectorPair { a, b })
}
