// SPDX-License-Identifier: MPL-2.0
//! Degree/minute/second coordinates as stored in the GPS IFD.
//!
//! A coordinate axis is three rationals. The hemisphere lives in a separate
//! reference tag (`N`/`S`, `E`/`W`), so the triplet itself is always the
//! absolute value.

use super::rational::{Rational, RationalError};

/// Number of decimal places kept for the seconds component.
const SECONDS_PRECISION: i32 = 5;

// =============================================================================
// CoordinateRational
// =============================================================================

/// One coordinate axis as `(degrees, minutes, seconds)` rationals.
///
/// Degrees and minutes are conventionally whole numbers stored as `n/1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordinateRational {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl CoordinateRational {
    #[must_use]
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Converts decimal degrees into a DMS triplet.
    ///
    /// The sign is dropped; callers record it in the matching reference tag.
    /// Seconds are rounded to five decimal places before being encoded.
    ///
    /// # Errors
    ///
    /// Returns an error when `value` is not finite or a component cannot be
    /// encoded as a 64-bit fraction.
    pub fn from_decimal(value: f64) -> Result<Self, RationalError> {
        if !value.is_finite() {
            return Err(RationalError::NotFinite);
        }

        let magnitude = value.abs();
        let degrees = magnitude.floor();
        let remainder_minutes = (magnitude - degrees) * 60.0;
        let minutes = remainder_minutes.floor();
        let seconds = round_to((remainder_minutes - minutes) * 60.0, SECONDS_PRECISION);

        Ok(Self {
            degrees: Rational::encode(degrees)?,
            minutes: Rational::encode(minutes)?,
            seconds: Rational::encode(seconds)?,
        })
    }

    /// Converts the triplet back into decimal degrees.
    ///
    /// Degrees and minutes are truncated to their integer part: a stored
    /// `45/2` degrees reads as 22, not 22.5. Seconds keep their fraction.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_decimal(&self) -> f64 {
        let degrees = self.degrees.truncated() as f64;
        let minutes = self.minutes.truncated() as f64;
        let seconds = self.seconds.numerator() as f64
            / (self.seconds.denominator() as f64 * 3600.0);
        degrees + minutes / 60.0 + seconds
    }

    /// Returns the three components in on-disk order.
    #[must_use]
    pub fn components(&self) -> [Rational; 3] {
        [self.degrees, self.minutes, self.seconds]
    }
}

/// Applies a hemisphere reference to an unsigned decimal coordinate.
///
/// `S` and `W` negate the value; anything else leaves it unchanged.
#[must_use]
pub fn apply_reference(reference: u8, decimal: f64) -> f64 {
    match reference {
        b'S' | b'W' => -decimal,
        _ => decimal,
    }
}

/// Rounds `value` to `places` decimal places, halves away from zero.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn rational(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn from_decimal_splits_into_whole_degrees_and_minutes() {
        // Paris: 48.8566
        let dms = CoordinateRational::from_decimal(48.8566).unwrap();
        assert_eq!(dms.degrees, Rational::whole(48));
        assert_eq!(dms.minutes, Rational::whole(51));
        assert_abs_diff_eq!(dms.seconds.to_f64(), 23.76, epsilon = 1e-5);
    }

    #[test]
    fn from_decimal_drops_sign() {
        let north = CoordinateRational::from_decimal(33.8688).unwrap();
        let south = CoordinateRational::from_decimal(-33.8688).unwrap();
        assert_eq!(north, south);
    }

    #[test]
    fn from_decimal_rejects_non_finite() {
        assert!(CoordinateRational::from_decimal(f64::NAN).is_err());
        assert!(CoordinateRational::from_decimal(f64::INFINITY).is_err());
    }

    #[test]
    fn from_decimal_zero() {
        let dms = CoordinateRational::from_decimal(0.0).unwrap();
        assert_eq!(dms.components(), [Rational::ZERO; 3]);
        assert_abs_diff_eq!(dms.to_decimal(), 0.0);
    }

    #[test]
    fn to_decimal_combines_components() {
        let dms = CoordinateRational::new(
            Rational::whole(12),
            Rational::whole(30),
            rational(0, 1),
        );
        assert_abs_diff_eq!(dms.to_decimal(), 12.5, epsilon = 1e-12);
    }

    #[test]
    fn to_decimal_divides_seconds_exactly() {
        let dms = CoordinateRational::new(
            Rational::whole(0),
            Rational::whole(0),
            rational(1800, 100),
        );
        assert_abs_diff_eq!(dms.to_decimal(), 0.005, epsilon = 1e-12);
    }

    #[test]
    fn to_decimal_truncates_fractional_degrees_and_minutes() {
        let dms = CoordinateRational::new(rational(45, 2), rational(61, 2), Rational::ZERO);
        // 22 + 30/60, the halves are dropped
        assert_abs_diff_eq!(dms.to_decimal(), 22.5, epsilon = 1e-12);

        let dms = CoordinateRational::new(rational(45, 2), Rational::ZERO, Rational::ZERO);
        assert_abs_diff_eq!(dms.to_decimal(), 22.0, epsilon = 1e-12);
    }

    #[test]
    fn apply_reference_negates_south_and_west() {
        assert_abs_diff_eq!(apply_reference(b'S', 12.5), -12.5);
        assert_abs_diff_eq!(apply_reference(b'W', 12.5), -12.5);
        assert_abs_diff_eq!(apply_reference(b'N', 12.5), 12.5);
        assert_abs_diff_eq!(apply_reference(b'E', 12.5), 12.5);
    }

    #[test]
    fn round_to_five_places() {
        assert_abs_diff_eq!(round_to(23.760_000_000_1, 5), 23.76);
        assert_abs_diff_eq!(round_to(1.234_567, 5), 1.234_57);
    }

    proptest! {
        #[test]
        fn decimal_round_trip_within_tolerance(value in -179.999_999_f64..179.999_999) {
            let dms = CoordinateRational::from_decimal(value).unwrap();
            prop_assert!(dms.degrees.is_whole());
            prop_assert!(dms.minutes.is_whole());
            prop_assert!((dms.to_decimal() - value.abs()).abs() < 1e-5);
        }
    }
}
