//! Shared test utilities for the piomas-netcdf workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Temporary directory helpers
//! - Synthetic binary and grid-file generators
//! - A scratch `grids/ binaries/ output/` directory layout
//! - Floating-point assertion macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, ScratchLayout};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Bitwise equality of two f32 sequences, treating NaN as equal to NaN.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_f32_bits_eq;
///
/// assert_f32_bits_eq!(&[1.0, f32::NAN], &[1.0, f32::NAN]);
/// ```
#[macro_export]
macro_rules! assert_f32_bits_eq {
    ($left:expr, $right:expr) => {{
        let left: &[f32] = $left;
        let right: &[f32] = $right;
        assert_eq!(left.len(), right.len(), "length mismatch");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let same = (l.is_nan() && r.is_nan()) || l.to_bits() == r.to_bits();
            if !same {
                panic!(
                    "assertion failed: values differ at index {}\n  left: `{:?}`,\n right: `{:?}`",
                    i, l, r
                );
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_f32_bits_eq_treats_nan_as_equal() {
        assert_f32_bits_eq!(&[1.5, f32::NAN], &[1.5, f32::NAN]);
    }

    #[test]
    #[should_panic(expected = "values differ at index 1")]
    fn test_assert_f32_bits_eq_fails() {
        assert_f32_bits_eq!(&[1.5, 2.0], &[1.5, 2.5]);
    }
}
