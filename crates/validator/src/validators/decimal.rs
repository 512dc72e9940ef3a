//! Decimal precision validator.
//!
//! Splits a decimal into its integer-digit and fraction-digit counts after
//! stripping trailing fractional zeros, then compares each count with an
//! optional upper bound.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// DIGIT DECOMPOSITION
// ============================================================================

/// Integer and fraction digit counts of a decimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitCounts {
    /// Digits left of the decimal point. Zero for purely fractional values.
    pub integer: u32,
    /// Digits right of the decimal point, trailing zeros excluded.
    pub fraction: u32,
}

impl DigitCounts {
    /// Decomposes `value`, ignoring its sign.
    ///
    /// ```
    /// use std::str::FromStr;
    ///
    /// use rust_decimal::Decimal;
    /// use sentinel_validator::validators::DigitCounts;
    ///
    /// let counts = DigitCounts::of(&Decimal::from_str("1.50").unwrap());
    /// assert_eq!((counts.integer, counts.fraction), (1, 1));
    ///
    /// let counts = DigitCounts::of(&Decimal::from_str("0.05").unwrap());
    /// assert_eq!((counts.integer, counts.fraction), (0, 2));
    /// ```
    #[must_use]
    pub fn of(value: &Decimal) -> Self {
        let normalized = value.normalize();
        let scale = normalized.scale();
        let precision = significant_digits(normalized.mantissa().unsigned_abs());
        Self {
            integer: precision.saturating_sub(scale),
            fraction: scale,
        }
    }
}

/// Number of decimal digits in `mantissa`; zero counts as one digit.
fn significant_digits(mantissa: u128) -> u32 {
    mantissa.checked_ilog10().map_or(1, |log| log + 1)
}

// ============================================================================
// DECIMAL PRECISION
// ============================================================================

/// Validates the integer and fraction digit counts of a decimal.
///
/// A bound of `None` leaves that part unconstrained.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
///
/// use rust_decimal::Decimal;
/// use sentinel_validator::validators::DecimalPrecision;
/// use sentinel_validator::foundation::Validate;
///
/// let money = DecimalPrecision::new(Some(5), Some(2));
/// assert!(money.is_valid(&Decimal::from_str("99999.89").unwrap()));
/// assert!(!money.is_valid(&Decimal::from_str("100000.89").unwrap()));
/// assert!(!money.is_valid(&Decimal::from_str("99999.899").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalPrecision {
    /// Maximum integer digits.
    pub integer_part: Option<u32>,
    /// Maximum fraction digits.
    pub fraction_part: Option<u32>,
}

impl DecimalPrecision {
    /// Creates a precision validator.
    #[must_use]
    pub fn new(integer_part: Option<u32>, fraction_part: Option<u32>) -> Self {
        Self {
            integer_part,
            fraction_part,
        }
    }

    fn exceeds(actual: u32, bound: Option<u32>) -> bool {
        bound.is_some_and(|max| actual > max)
    }
}

impl Validate for DecimalPrecision {
    type Input = Decimal;

    fn validate(&self, input: &Decimal) -> Result<(), ValidationError> {
        let counts = DigitCounts::of(input);

        if Self::exceeds(counts.integer, self.integer_part)
            || Self::exceeds(counts.fraction, self.fraction_part)
        {
            let mut error = ValidationError::new(
                "decimal_precision",
                "Too many integer or fraction digits",
            )
            .with_param("integer_digits", counts.integer.to_string())
            .with_param("fraction_digits", counts.fraction.to_string());
            if let Some(max) = self.integer_part {
                error = error.with_param("integer_part", max.to_string());
            }
            if let Some(max) = self.fraction_part {
                error = error.with_param("fraction_part", max.to_string());
            }
            return Err(error);
        }

        Ok(())
    }
}

/// Creates a [`DecimalPrecision`] with both bounds set.
#[must_use]
pub fn decimal_precision(integer_part: u32, fraction_part: u32) -> DecimalPrecision {
    DecimalPrecision::new(Some(integer_part), Some(fraction_part))
}

// ============================================================================
// TESTS
// ============================================================================
