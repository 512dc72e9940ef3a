//! Pattern-constrained date range validator.

use chrono::NaiveDateTime;

use super::date_pattern::{DatePattern, PatternError};
use crate::foundation::{Validate, ValidationError};

// ============================================================================
// DATE TIME RANGE
// ============================================================================

/// Validates that a string parses with a date pattern and falls inside
/// optional inclusive bounds.
///
/// Bounds are parsed with the same pattern when the validator is built; an
/// empty bound string means "unbounded".
///
/// # Examples
///
/// ```
/// use sentinel_validator::validators::DateTimeRange;
/// use sentinel_validator::foundation::Validate;
///
/// let range = DateTimeRange::new("yyyy-MM-dd", "2020-01-01", "2030-12-31").unwrap();
/// assert!(range.is_valid("2025-01-01"));
/// assert!(!range.is_valid("2019-12-31"));
/// assert!(!range.is_valid("2025-13-40"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeRange {
    pattern: DatePattern,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
}

impl DateTimeRange {
    /// Compiles `pattern` and parses both bounds with it.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the pattern does not compile or a
    /// non-empty bound does not parse.
    pub fn new(pattern: &str, min: &str, max: &str) -> Result<Self, PatternError> {
        let pattern = DatePattern::compile(pattern)?;
        let min = parse_bound(&pattern, min)?;
        let max = parse_bound(&pattern, max)?;
        Ok(Self { pattern, min, max })
    }

    /// Creates an unbounded validator that only checks the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the pattern does not compile.
    pub fn pattern_only(pattern: &str) -> Result<Self, PatternError> {
        Self::new(pattern, "", "")
    }

    /// The compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &DatePattern {
        &self.pattern
    }

    /// Lower bound, if any.
    #[must_use]
    pub fn min(&self) -> Option<NaiveDateTime> {
        self.min
    }

    /// Upper bound, if any.
    #[must_use]
    pub fn max(&self) -> Option<NaiveDateTime> {
        self.max
    }
}

fn parse_bound(pattern: &DatePattern, bound: &str) -> Result<Option<NaiveDateTime>, PatternError> {
    if bound.is_empty() {
        return Ok(None);
    }
    pattern
        .parse(bound)
        .map(Some)
        .map_err(|_| PatternError::InvalidBound {
            bound: bound.to_string(),
            pattern: pattern.source().to_string(),
        })
}

impl Validate for DateTimeRange {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let value = self.pattern.parse(input).map_err(|err| {
            ValidationError::invalid_format("date_time")
                .with_param("pattern", self.pattern.source().to_string())
                .with_param("parse_error", err.to_string())
        })?;

        let before_min = self.min.is_some_and(|min| value < min);
        let after_max = self.max.is_some_and(|max| value > max);
        if before_min || after_max {
            let mut error = ValidationError::new("date_out_of_range", "Date is out of range")
                .with_param("actual", input.to_string());
            if let Some(min) = self.min {
                error = error.with_param("min", min.to_string());
            }
            if let Some(max) = self.max {
                error = error.with_param("max", max.to_string());
            }
            return Err(error);
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
