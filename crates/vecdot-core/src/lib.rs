//! # `vecdot` Core
//!
//! Single-precision dot product kernels and the harness that times them.
//!
//! The kernel is picked from the instruction set of the running CPU:
//!
//! - **AVX** on x86 / x86_64 when the CPU reports it (8 lanes)
//! - **NEON** on aarch64 (4 lanes)
//! - **Scalar** everywhere else
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vecdot_core::{bench, BenchConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = bench::run(&BenchConfig::default())?;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::cast_precision_loss,
        clippy::uninlined_format_args
    )
)]

pub mod bench;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod error;
pub mod simd_native;
pub mod workload;

pub use bench::BenchReport;
pub use config::{BenchConfig, KernelChoice};
pub use error::{Error, Result};
pub use simd_native::{arch_name, dot_product_native, dot_product_with, simd_level, SimdLevel};
pub use workload::{generate_pair, UniformF32, VectorPair};
