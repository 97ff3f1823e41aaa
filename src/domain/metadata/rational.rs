// SPDX-License-Identifier: MPL-2.0
//! Exact numerator/denominator values.
//!
//! EXIF stores every non-integer number as a pair of integers. [`Rational::encode`]
//! turns a floating value into the exact fraction of its shortest decimal
//! representation, so `23.76` becomes `594/25` rather than the nearest binary
//! fraction of the double.

use std::fmt;

// =============================================================================
// RationalError
// =============================================================================

/// Reasons a floating value cannot be encoded as a [`Rational`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationalError {
    /// The value is NaN or infinite.
    NotFinite,
    /// The exact fraction does not fit in 64-bit numerator/denominator.
    OutOfRange,
}

impl fmt::Display for RationalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RationalError::NotFinite => write!(f, "value is not a finite number"),
            RationalError::OutOfRange => write!(f, "value cannot be represented as a fraction"),
        }
    }
}

impl std::error::Error for RationalError {}

// =============================================================================
// Rational
// =============================================================================

/// A fraction with a non-zero denominator.
///
/// Values built by [`Rational::encode`] are in lowest terms with a positive
/// denominator. Values built with [`Rational::new`] keep the pair as given,
/// which is how fractions read from an existing image are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    /// Zero, as `0/1`.
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a fraction, returning `None` when `denominator` is zero.
    #[must_use]
    pub fn new(numerator: i64, denominator: i64) -> Option<Self> {
        (denominator != 0).then_some(Self {
            numerator,
            denominator,
        })
    }

    /// Creates the whole number `value/1`.
    #[must_use]
    pub const fn whole(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// Encodes `value` as the exact, reduced fraction of its decimal form.
    ///
    /// # Errors
    ///
    /// Returns [`RationalError::NotFinite`] for NaN and infinities, and
    /// [`RationalError::OutOfRange`] when the fraction needs more than 64 bits.
    pub fn encode(value: f64) -> Result<Self, RationalError> {
        if !value.is_finite() {
            return Err(RationalError::NotFinite);
        }

        // `Display` for f64 is the shortest round-trip form and never uses exponents.
        let text = value.to_string();
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.as_str()),
        };
        let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));

        let mut numerator: i128 = 0;
        for c in int_part.chars().chain(frac_part.chars()) {
            let digit = c.to_digit(10).ok_or(RationalError::OutOfRange)?;
            numerator = numerator
                .checked_mul(10)
                .and_then(|n| n.checked_add(i128::from(digit)))
                .ok_or(RationalError::OutOfRange)?;
        }

        let scale = u32::try_from(frac_part.len()).map_err(|_| RationalError::OutOfRange)?;
        let mut denominator = 10_i128
            .checked_pow(scale)
            .ok_or(RationalError::OutOfRange)?;

        let divisor = gcd(numerator, denominator);
        numerator /= divisor;
        denominator /= divisor;
        if negative {
            numerator = -numerator;
        }

        Ok(Self {
            numerator: i64::try_from(numerator).map_err(|_| RationalError::OutOfRange)?,
            denominator: i64::try_from(denominator).map_err(|_| RationalError::OutOfRange)?,
        })
    }

    #[must_use]
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Integer part of the fraction, truncated toward zero.
    #[must_use]
    pub fn truncated(&self) -> i64 {
        self.numerator / self.denominator
    }

    /// Returns the fraction as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Returns true when the denominator divides the numerator.
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.numerator % self.denominator == 0
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Greatest common divisor of two non-negative integers.
fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// =============================================================================
// Tests
// =============================================================================
