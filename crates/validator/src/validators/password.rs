//! Password complexity validator.
//!
//! Validates passwords against a length window and up to four required
//! character categories.

use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};

// ============================================================================
// CHARACTER CATEGORIES
// ============================================================================

/// Character category of one password character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharCategory {
    /// Unicode uppercase letter.
    Uppercase,
    /// Unicode lowercase letter.
    Lowercase,
    /// ASCII digit `0`-`9`.
    Digit,
    /// One of [`Password::SPECIAL_CHARS`].
    Special,
}

impl CharCategory {
    /// Classifies `c`, testing uppercase, lowercase, digit, then special.
    /// The first match wins.
    #[must_use]
    pub fn of(c: char) -> Option<Self> {
        if c.is_uppercase() {
            Some(Self::Uppercase)
        } else if c.is_lowercase() {
            Some(Self::Lowercase)
        } else if c.is_ascii_digit() {
            Some(Self::Digit)
        } else if Password::SPECIAL_CHARS.contains(c) {
            Some(Self::Special)
        } else {
            None
        }
    }
}

// ============================================================================
// PASSWORD VALIDATOR
// ============================================================================

/// Validates password length and character-category requirements.
///
/// Length is counted in chars and must lie in `min_length..=max_length`.
/// Every required category must be present at least once.
///
/// # Examples
///
/// ```
/// use sentinel_validator::validators::Password;
/// use sentinel_validator::foundation::Validate;
///
/// let policy = Password::new();
/// assert!(policy.is_valid("DO27^dsfHJKEWA"));
/// assert!(!policy.is_valid("DO27dsfHJKEWA"));
///
/// let relaxed = Password::new().require_special(false).min_length(4);
/// assert!(relaxed.is_valid("Ab1x"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Password {
    /// Minimum length in chars.
    pub min_length: usize,
    /// Maximum length in chars.
    pub max_length: usize,
    /// Require an uppercase letter.
    pub require_uppercase: bool,
    /// Require a lowercase letter.
    pub require_lowercase: bool,
    /// Require a digit.
    pub require_digit: bool,
    /// Require a special character.
    pub require_special: bool,
}

impl Password {
    /// The fixed special-character set.
    pub const SPECIAL_CHARS: &'static str = "!@#$%^&*(),.?\":{}|<>";

    /// Creates the default policy: 8 to 64 chars, all four categories required.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_length: 8,
            max_length: 64,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }

    /// Sets the minimum password length.
    #[must_use = "builder methods must be chained or built"]
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = len;
        self
    }

    /// Sets the maximum password length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = len;
        self
    }

    /// Sets whether an uppercase letter is required.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_uppercase(mut self, required: bool) -> Self {
        self.require_uppercase = required;
        self
    }

    /// Sets whether a lowercase letter is required.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_lowercase(mut self, required: bool) -> Self {
        self.require_lowercase = required;
        self
    }

    /// Sets whether a digit is required.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_digit(mut self, required: bool) -> Self {
        self.require_digit = required;
        self
    }

    /// Sets whether a special character is required.
    #[must_use = "builder methods must be chained or built"]
    pub fn require_special(mut self, required: bool) -> Self {
        self.require_special = required;
        self
    }

    fn missing_categories(&self, input: &str) -> Vec<&'static str> {
        let (mut upper, mut lower, mut digit, mut special) = (false, false, false, false);
        for c in input.chars() {
            match CharCategory::of(c) {
                Some(CharCategory::Uppercase) => upper = true,
                Some(CharCategory::Lowercase) => lower = true,
                Some(CharCategory::Digit) => digit = true,
                Some(CharCategory::Special) => special = true,
                None => {}
            }
        }

        [
            (self.require_uppercase && !upper, "uppercase"),
            (self.require_lowercase && !lower, "lowercase"),
            (self.require_digit && !digit, "digit"),
            (self.require_special && !special, "special"),
        ]
        .into_iter()
        .filter_map(|(missing, name)| missing.then_some(name))
        .collect()
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for Password {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        let len = input.chars().count();
        if len < self.min_length || len > self.max_length {
            return Err(ValidationError::length_range(
                self.min_length,
                self.max_length,
                len,
            ));
        }

        let missing = self.missing_categories(input);
        if !missing.is_empty() {
            return Err(ValidationError::new(
                "password_complexity",
                "Password is missing required character categories",
            )
            .with_param("missing", missing.join(",")));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
