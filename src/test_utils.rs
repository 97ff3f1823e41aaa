// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and shared image fixtures.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::assert_abs_diff_eq;

/// Default epsilon for f64 comparisons.
/// Suitable for values that should be "exactly equal" but may have minor floating-point errors.
pub const F64_EPSILON: f64 = 1e-10;

/// Smallest well-formed JPEG stream: SOI immediately followed by EOI.
pub const MINIMAL_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];
