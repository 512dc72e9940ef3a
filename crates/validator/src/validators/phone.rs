//! Mainland China mobile number validator.

use std::sync::LazyLock;

use crate::foundation::ValidationError;

static MOBILE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^1[3-9][0-9]{9}$").unwrap());

// ============================================================================
// PHONE NUMBER VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates an 11-digit mobile number.
    ///
    /// The first digit must be `1` and the second in `3`–`9`. No separators,
    /// country code or leading `+` are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_validator::validators::phone;
    /// use sentinel_validator::foundation::Validate;
    ///
    /// assert!(phone().is_valid("13433334555"));
    /// assert!(!phone().is_valid("12433334555"));
    /// assert!(!phone().is_valid("+8613433334555"));
    /// ```
    pub Phone for str;
    rule(input) { MOBILE_REGEX.is_match(input) }
    error(input) {
        ValidationError::invalid_format("phone")
            .with_param("actual_length", input.chars().count().to_string())
    }
    fn phone();
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
    #[case("13433334555", true)]
    #[case("19900000000", true)]
    #[case("13000000000", true)]
    #[case("12000000000", false)]
    #[case("23433334555", false)]
    #[case("1343333455", false)]
    #[case("134333345555", false)]
    #[case("1343333455a", false)]
    #[case("134 3333 4555", false)]
    #[case("１3433334555", false)]
    fn test_phone(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(phone().is_valid(input), valid, "{input}");
    }
}
