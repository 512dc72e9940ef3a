//! Numeric range validators

use std::fmt::Display;

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a value is within an inclusive range.
    ///
    /// Backs the price rule (over [`rust_decimal::Decimal`], compared exactly)
    /// and the quantity rule (over `i64`).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::str::FromStr;
    ///
    /// use rust_decimal::Decimal;
    /// use sentinel_validator::validators::in_range;
    /// use sentinel_validator::foundation::Validate;
    ///
    /// let price = in_range(Decimal::from_str("0.01").unwrap(), Decimal::from_str("999999.99").unwrap());
    /// assert!(price.is_valid(&Decimal::from_str("0.01").unwrap()));
    /// assert!(!price.is_valid(&Decimal::from_str("0.00").unwrap()));
    ///
    /// let qty = in_range(1_i64, 100);
    /// assert!(qty.is_valid(&100));
    /// assert!(!qty.is_valid(&200));
    /// ```
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub InRange<T: PartialOrd + Display + Copy> { min: T, max: T } for T;
    rule(self, input) { *input >= self.min && *input <= self.max }
    error(self, input) {
        ValidationError::out_of_range(self.min, self.max, *input)
    }
    fn in_range(min: T, max: T);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use rust_decimal::Decimal;

    use super::*;
    use crate::foundation::Validate;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[rstest]
    #[case("0.01", true)]
    #[case("0.00", false)]
    #[case("0.009", false)]
    #[case("999999.99", true)]
    #[case("999999.990", true)]
    #[case("1000000.00", false)]
    #[case("999999.991", false)]
    fn test_price_inclusive(#[case] value: &str, #[case] valid: bool) {
        let price = in_range(dec("0.01"), dec("999999.99"));
        assert_eq!(price.is_valid(&dec(value)), valid, "{value}");
    }

    #[rstest]
    #[case(1, true)]
    #[case(80, true)]
    #[case(100, true)]
    #[case(0, false)]
    #[case(101, false)]
    #[case(-5, false)]
    fn test_quantity_inclusive(#[case] value: i64, #[case] valid: bool) {
        assert_eq!(in_range(1_i64, 100).is_valid(&value), valid);
    }

    #[test]
    fn test_out_of_range_params() {
        let err = in_range(1_i64, 100).validate(&200).unwrap_err();
        assert_eq!(err.code, "out_of_range");
        assert_eq!(err.param("actual"), Some("200"));
        assert_eq!(err.param("max"), Some("100"));
    }
}
