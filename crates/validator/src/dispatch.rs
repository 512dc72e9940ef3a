//! Rule dispatch: applying the rules attached to one field.
//!
//! Each [`RuleAttachment`] selects its library validator, checks that the
//! field value has the shape the rule kind expects, and runs the predicate.
//! Every failure, including a missing value or a shape mismatch, becomes a
//! [`ValidationError`] carrying the rule's code and declared message. The
//! validator's own diagnostic is kept in the error params.

use rust_decimal::Decimal;
use tracing::debug;

use crate::foundation::{Validate, ValidationError, ValidationErrors};
use crate::schema::{FieldDescriptor, Rule, RuleAttachment};
use crate::validators::{email, id_card, in_range, length_range, phone, postal_code, url};
use crate::value::{FieldValue, FileData};

// ============================================================================
// SHAPE CHECKS
// ============================================================================

fn absent() -> ValidationError {
    ValidationError::new("absent", "Value is absent")
}

fn mismatch(expected: &'static str, value: &FieldValue<'_>) -> ValidationError {
    ValidationError::type_mismatch(expected, value.kind())
}

fn text<'v>(value: &FieldValue<'v>) -> Result<&'v str, ValidationError> {
    match *value {
        FieldValue::Text(text) => Ok(text),
        FieldValue::Absent => Err(absent()),
        _ => Err(mismatch("text", value)),
    }
}

fn integer(value: &FieldValue<'_>) -> Result<i64, ValidationError> {
    match *value {
        FieldValue::Integer(n) => Ok(n),
        FieldValue::Absent => Err(absent()),
        _ => Err(mismatch("integer", value)),
    }
}

fn decimal(value: &FieldValue<'_>) -> Result<Decimal, ValidationError> {
    match *value {
        FieldValue::Decimal(d) => Ok(d),
        FieldValue::Integer(n) => Ok(Decimal::from(n)),
        FieldValue::Absent => Err(absent()),
        _ => Err(mismatch("decimal", value)),
    }
}

fn file<'v>(value: &FieldValue<'v>) -> Result<&'v FileData, ValidationError> {
    match *value {
        FieldValue::File(file) => Ok(file),
        FieldValue::Absent => Err(absent()),
        _ => Err(mismatch("file", value)),
    }
}

// ============================================================================
// RULE EVALUATION
// ============================================================================

/// Runs the library validator for `rule` against `value`.
fn evaluate(rule: &Rule, value: &FieldValue<'_>) -> Result<(), ValidationError> {
    match rule {
        Rule::Email => email().validate(text(value)?),
        Rule::Phone => phone().validate(text(value)?),
        Rule::IdCard => id_card().validate(text(value)?),
        Rule::PostalCode => postal_code().validate(text(value)?),
        Rule::Url => url().validate(text(value)?),
        Rule::Price { min, max } => {
            in_range(*min, max.unwrap_or(Decimal::MAX)).validate(&decimal(value)?)
        }
        Rule::Quantity { min, max } => {
            in_range(*min, max.unwrap_or(i64::MAX)).validate(&integer(value)?)
        }
        Rule::Name {
            min_length,
            max_length,
        }
        | Rule::Address {
            min_length,
            max_length,
        } => length_range(*min_length, *max_length).validate(text(value)?),
        Rule::Decimal(precision) => precision.validate(&decimal(value)?),
        Rule::DateTimeRange(range) => {
            let input = text(value)?;
            let compiled = range.compiled().map_err(|err| {
                ValidationError::new("invalid_pattern", err.to_string())
                    .with_param("pattern", range.params().pattern.clone())
            })?;
            compiled.validate(input)
        }
        Rule::FileConstraint(constraint) => constraint.validate(file(value)?),
        Rule::Password(policy) => policy.validate(text(value)?),
        Rule::EnumMembership(members) => match value.string_form() {
            Some(name) => members.validate(&name),
            None if value.is_absent() => Err(absent()),
            None => Err(mismatch("scalar", value)),
        },
    }
}

impl RuleAttachment {
    /// Checks one value against this attachment.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] whose code is the rule kind's code and
    /// whose message is the declared message. The params carry the
    /// underlying diagnostic: a `reason` code plus the validator's own params.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_validator::schema::RuleAttachment;
    /// use sentinel_validator::value::FieldValue;
    ///
    /// let qty = RuleAttachment::quantity(1, 100).with_message("qty must be 1..=100");
    /// assert!(qty.check(&FieldValue::Integer(80)).is_ok());
    ///
    /// let err = qty.check(&FieldValue::Text("80")).unwrap_err();
    /// assert_eq!(err.code, "quantity");
    /// assert_eq!(err.message, "qty must be 1..=100");
    /// assert_eq!(err.param("reason"), Some("type_mismatch"));
    /// ```
    pub fn check(&self, value: &FieldValue<'_>) -> Result<(), ValidationError> {
        evaluate(self.rule(), value).map_err(|diagnostic| {
            let mut error = ValidationError::new(self.rule().code(), self.message_cow())
                .with_param("reason", diagnostic.code);
            error.params.extend(diagnostic.params);
            error
        })
    }
}

// ============================================================================
// FIELD DISPATCH
// ============================================================================

/// Applies every rule attached to `descriptor` to `value`, in declaration
/// order, appending one error per failed rule to `errors`.
///
/// All rules run even after an earlier one fails.
pub fn dispatch(
    descriptor: &FieldDescriptor,
    value: &FieldValue<'_>,
    errors: &mut ValidationErrors,
) {
    for attachment in descriptor.rules() {
        if let Err(error) = attachment.check(value) {
            debug!(
                field = descriptor.name(),
                code = %error.code,
                reason = error.param("reason").unwrap_or_default(),
                "rule violated"
            );
            errors.add(error.with_field(descriptor.name_cow()));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::validators::Password;

    fn dec(s: &str) -> FieldValue<'static> {
        FieldValue::Decimal(Decimal::from_str(s).unwrap())
    }

    #[rstest]
    #[case(RuleAttachment::email(), FieldValue::Text("a@b"), true)]
    #[case(RuleAttachment::email(), FieldValue::Text("ab"), false)]
    #[case(RuleAttachment::email(), FieldValue::Absent, false)]
    #[case(RuleAttachment::email(), FieldValue::Integer(1), false)]
    #[case(RuleAttachment::phone(), FieldValue::Text("13433334555"), true)]
    #[case(RuleAttachment::id_card(), FieldValue::Text("11010519900101123X"), true)]
    #[case(RuleAttachment::postal_code(), FieldValue::Text("518035"), true)]
    #[case(RuleAttachment::url(), FieldValue::Text("https://example.com"), true)]
    #[case(RuleAttachment::name(1, 50), FieldValue::Text(""), false)]
    #[case(RuleAttachment::address(5, 200), FieldValue::Text("深圳市南山区"), true)]
    #[case(RuleAttachment::quantity(1, 100), FieldValue::Integer(100), true)]
    #[case(RuleAttachment::quantity(1, 100), FieldValue::Integer(200), false)]
    #[case(RuleAttachment::quantity(1, 100), dec("80"), false)]
    #[case(RuleAttachment::quantity_at_least(0), FieldValue::Integer(i64::MAX), true)]
    #[case(RuleAttachment::price(Decimal::new(1, 2), Decimal::new(99_999_999, 2)), dec("0.01"), true)]
    #[case(RuleAttachment::price(Decimal::new(1, 2), Decimal::new(99_999_999, 2)), dec("0.00"), false)]
    #[case(RuleAttachment::price_at_least(Decimal::ZERO), FieldValue::Integer(5), true)]
    #[case(RuleAttachment::price_at_least(Decimal::ZERO), FieldValue::Text("5"), false)]
    #[case(RuleAttachment::decimal(5, 2), dec("99999.89"), true)]
    #[case(RuleAttachment::decimal(5, 2), FieldValue::Integer(123456), false)]
    #[case(RuleAttachment::decimal(5, 2), FieldValue::Bool(true), false)]
    #[case(RuleAttachment::date("yyyy-MM-dd"), FieldValue::Text("2025-01-01"), true)]
    #[case(RuleAttachment::date("yyyy-QQ"), FieldValue::Text("2025-01"), false)]
    #[case(RuleAttachment::password(), FieldValue::Text("DO27^dsfHJKEWA"), true)]
    #[case(RuleAttachment::password(), FieldValue::Absent, false)]
    #[case(RuleAttachment::file(10, ["image/png"]), FieldValue::Absent, false)]
    #[case(RuleAttachment::file(10, ["image/png"]), FieldValue::Text("x.png"), false)]
    fn test_check(
        #[case] rule: RuleAttachment,
        #[case] value: FieldValue<'static>,
        #[case] valid: bool,
    ) {
        assert_eq!(rule.check(&value).is_ok(), valid, "{rule} on {value}");
    }

    #[test]
    fn test_file_rule() {
        let rule = RuleAttachment::file(10, ["image/png"]);
        let ok = FileData::new(vec![0_u8; 1024], "image/png");
        let too_big = FileData::new(vec![0_u8; 20 * 1024], "image/png");
        assert!(rule.check(&FieldValue::File(&ok)).is_ok());
        let err = rule.check(&FieldValue::File(&too_big)).unwrap_err();
        assert_eq!(err.param("reason"), Some("file_too_large"));
    }

    #[rstest]
    #[case(FieldValue::Text("HIGH"), true)]
    #[case(FieldValue::Enum("LOW"), true)]
    #[case(FieldValue::Text("high"), false)]
    #[case(FieldValue::Integer(1), false)]
    #[case(FieldValue::Absent, false)]
    #[case(FieldValue::Opaque("sequence"), false)]
    fn test_enum_membership(#[case] value: FieldValue<'static>, #[case] valid: bool) {
        let rule = RuleAttachment::new(Rule::EnumMembership(
            crate::validators::enum_member(&["LOW", "HIGH"]),
        ));
        assert_eq!(rule.check(&value).is_ok(), valid, "{value}");
    }

    #[test]
    fn test_enum_membership_uses_string_form() {
        let rule = RuleAttachment::new(Rule::EnumMembership(crate::validators::enum_member(&[
            "1", "true",
        ])));
        assert!(rule.check(&FieldValue::Integer(1)).is_ok());
        assert!(rule.check(&FieldValue::Bool(true)).is_ok());
    }

    #[test]
    fn test_violation_carries_declared_message_and_diagnostic() {
        let rule = RuleAttachment::quantity(1, 100).with_message("qty out of range");
        let err = rule.check(&FieldValue::Integer(200)).unwrap_err();
        assert_eq!(err.code, "quantity");
        assert_eq!(err.message, "qty out of range");
        assert_eq!(err.param("reason"), Some("out_of_range"));
        assert_eq!(err.param("actual"), Some("200"));
    }

    #[test]
    fn test_shape_mismatch_uses_rule_message() {
        let rule = RuleAttachment::decimal(5, 2);
        let err = rule.check(&FieldValue::Text("1.5")).unwrap_err();
        assert_eq!(err.message, "Decimal precision is out of range");
        assert_eq!(err.param("expected"), Some("decimal"));
        assert_eq!(err.param("actual"), Some("text"));
    }

    #[test]
    fn test_bad_pattern_is_a_violation() {
        let rule = RuleAttachment::date("yyyy-QQ");
        let err = rule.check(&FieldValue::Text("2025-01")).unwrap_err();
        assert_eq!(err.code, "date_time_range");
        assert_eq!(err.param("reason"), Some("invalid_pattern"));
    }

    #[test]
    fn test_time_only_pattern_always_fails() {
        let rule = RuleAttachment::date("HH:mm:ss");
        let err = rule.check(&FieldValue::Text("08:30:00")).unwrap_err();
        assert_eq!(err.param("reason"), Some("invalid_pattern"));
        assert_eq!(err.param("pattern"), Some("HH:mm:ss"));
    }

    #[test]
    fn test_date_rule_reports_one_reason() {
        let rule = RuleAttachment::date_time_range("yyyy-MM-dd", "2020-01-01", "2030-12-31");
        let err = rule.check(&FieldValue::Text("2025-1-1")).unwrap_err();
        let reasons = err.params.iter().filter(|(key, _)| key == "reason").count();
        assert_eq!(reasons, 1);
        assert_eq!(err.param("reason"), Some("invalid_format"));
        assert!(err.param("parse_error").is_some());
    }

    #[test]
    fn test_date_rule_is_compiled_when_declared() {
        let rule = RuleAttachment::date_time_range("yyyy-MM-dd", "2020-01-01", "2030-12-31");
        let Rule::DateTimeRange(range) = rule.rule() else {
            panic!("expected a date-time range rule");
        };
        let compiled = range.compiled().unwrap();
        assert_eq!(compiled.min().map(|min| min.to_string()).as_deref(), Some("2020-01-01 00:00:00"));
        assert!(rule.check(&FieldValue::Text("2025-06-30")).is_ok());
        assert!(rule.check(&FieldValue::Text("2019-06-30")).is_err());
    }

    #[test]
    fn test_dispatch_runs_every_rule() {
        let descriptor = FieldDescriptor::new(
            "secret",
            [
                RuleAttachment::name(1, 4).with_message("too long"),
                RuleAttachment::password_with(Password::new().min_length(1)).with_message("weak"),
                RuleAttachment::email().with_message("not an email"),
            ],
        );
        let mut errors = ValidationErrors::new();
        dispatch(&descriptor, &FieldValue::Text("abcdef"), &mut errors);

        assert_eq!(errors.messages(), vec!["too long", "weak", "not an email"]);
        assert!(errors.iter().all(|e| e.field.as_deref() == Some("secret")));
    }

    #[test]
    fn test_dispatch_without_rules_adds_nothing() {
        let descriptor = FieldDescriptor::new("free", []);
        let mut errors = ValidationErrors::new();
        dispatch(&descriptor, &FieldValue::Absent, &mut errors);
        assert!(errors.is_empty());
    }
}
