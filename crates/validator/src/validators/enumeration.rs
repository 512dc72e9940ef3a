//! Enum membership validator.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};
use crate::value::EnumMembers;

/// Validates that a string exactly names a member of an enumeration.
///
/// Comparison is case-sensitive.
///
/// # Examples
///
/// ```
/// use sentinel_validator::validators::enum_member;
/// use sentinel_validator::foundation::Validate;
///
/// let status = enum_member(&["Active", "Disabled"]);
/// assert!(status.is_valid("Active"));
/// assert!(!status.is_valid("active"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member names.
    pub members: Vec<Cow<'static, str>>,
}

impl EnumMember {
    /// Creates a validator from member names.
    pub fn new<S>(members: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a validator accepting the members of `E`.
    #[must_use]
    pub fn of<E: EnumMembers>() -> Self {
        Self::new(E::MEMBERS.iter().copied())
    }
}

impl Validate for EnumMember {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.members.iter().any(|member| member == input) {
            return Ok(());
        }
        Err(
            ValidationError::new("enum_member", "Value is not a member of the enumeration")
                .with_param("allowed", self.members.join(","))
                .with_param("actual", input.to_string()),
        )
    }
}

/// Creates an [`EnumMember`] over static member names.
#[must_use]
pub fn enum_member(members: &'static [&'static str]) -> EnumMember {
    EnumMember::new(members.iter().copied())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &[&str] = &["LOW", "MEDIUM", "HIGH"];

    struct Level;

    impl EnumMembers for Level {
        const MEMBERS: &'static [&'static str] = LEVELS;

        fn member_name(&self) -> &'static str {
            "LOW"
        }
    }

    #[test]
    fn test_exact_member_names() {
        let levels = enum_member(LEVELS);
        assert!(levels.is_valid("LOW"));
        assert!(levels.is_valid("HIGH"));
        assert!(!levels.is_valid("low"));
        assert!(!levels.is_valid("LOW "));
        assert!(!levels.is_valid(""));
    }

    #[test]
    fn test_from_enum_members() {
        assert_eq!(EnumMember::of::<Level>(), enum_member(LEVELS));
        assert!(EnumMember::new(vec![String::from("dynamic")]).is_valid("dynamic"));
    }

    #[test]
    fn test_error_lists_members() {
        let err = enum_member(LEVELS).validate("NONE").unwrap_err();
        assert_eq!(err.param("allowed"), Some("LOW,MEDIUM,HIGH"));
        assert_eq!(err.param("actual"), Some("NONE"));
    }
}
