//! String length validators
//!
//! Length is measured in Unicode scalar values (chars), so `"张三"` has a
//! length of two.

use crate::foundation::ValidationError;

// ============================================================================
// LENGTH RANGE
// ============================================================================

crate::validator! {
    /// Validates that a string's character length lies in `min..=max`.
    ///
    /// Backs both the name and address rule kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_validator::validators::length_range;
    /// use sentinel_validator::foundation::Validate;
    ///
    /// let name = length_range(1, 3);
    /// assert!(name.is_valid("张三"));
    /// assert!(!name.is_valid(""));
    /// assert!(!name.is_valid("abcd"));
    /// ```
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub LengthRange { min: usize, max: usize } for str;
    rule(self, input) {
        let len = input.chars().count();
        len >= self.min && len <= self.max
    }
    error(self, input) {
        ValidationError::length_range(self.min, self.max, input.chars().count())
    }
    fn length_range(min: usize, max: usize);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::foundation::Validate;

    #[rstest]
    #[case("abcde", true)]
    #[case("abcdefghij", true)]
    #[case("abcd", false)]
    #[case("abcdefghijk", false)]
    #[case("深圳市南山区", true)]
    #[case("南山区", false)]
    fn test_length_range_inclusive(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(length_range(5, 10).is_valid(input), valid, "{input}");
    }

    #[test]
    fn test_error_reports_char_count() {
        let err = length_range(5, 200).validate("南山").unwrap_err();
        assert_eq!(err.code, "length_range");
        assert_eq!(err.param("actual"), Some("2"));
        assert_eq!(err.param("min"), Some("5"));
    }
}
