//! Error types for validation failures
//!
//! A [`ValidationError`] describes one failed rule attachment. A
//! [`ValidationErrors`] collects every failure of one validation call and is
//! the single aggregate error handed back to callers.
//!
//! All string fields use `Cow<'static, str>` so the common case of static
//! codes and declared messages does not allocate.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single rule violation.
///
/// # Examples
///
/// ```
/// use sentinel_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("quantity", "Quantity out of range")
///     .with_field("qty")
///     .with_param("min", "1")
///     .with_param("actual", "200");
///
/// assert_eq!(error.field.as_deref(), Some("qty"));
/// assert_eq!(error.param("actual"), Some("200"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling.
    ///
    /// Rule violations use the rule kind code: "email", "price", "decimal", ...
    pub code: Cow<'static, str>,

    /// Human-readable message. For rule violations this is the message
    /// declared on the rule attachment.
    pub message: Cow<'static, str>,

    /// Name of the field the failed rule is attached to.
    pub field: Option<Cow<'static, str>>,

    /// Diagnostic parameters, in insertion order.
    ///
    /// Example: `[("expected", "text"), ("actual", "integer")]`
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field name for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a diagnostic parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the message, keeping code, field and params.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)?;
        } else {
            write!(f, "{}: {}", self.code, self.message)?;
        }

        if !self.params.is_empty() {
            write!(f, " (params: [")?;
            for (i, (k, v)) in self.params.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "])")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates an "invalid_format" error.
    pub fn invalid_format(expected: impl Into<Cow<'static, str>>) -> Self {
        Self::new("invalid_format", "Invalid format").with_param("expected", expected)
    }

    /// Creates a "length_range" error.
    pub fn length_range(min: usize, max: usize, actual: usize) -> Self {
        Self::new(
            "length_range",
            format!("Length must be between {min} and {max} characters"),
        )
        .with_param("min", min.to_string())
        .with_param("max", max.to_string())
        .with_param("actual", actual.to_string())
    }

    /// Creates an "out_of_range" error.
    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new(
            "out_of_range",
            format!("Value must be between {min} and {max}"),
        )
        .with_param("min", min.to_string())
        .with_param("max", max.to_string())
        .with_param("actual", actual.to_string())
    }

    /// Creates a "type_mismatch" error.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new("type_mismatch", "Type mismatch")
            .with_param("expected", expected)
            .with_param("actual", actual)
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of validation errors.
///
/// This is the aggregate failure of a validation call: it is only ever
/// returned non-empty, and it carries every violation in field declaration
/// order, then rule attachment order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the messages of all errors, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_ref()).collect()
    }

    /// Returns the errors attached to one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |e| e.field.as_deref() == Some(field))
    }

    /// Iterates over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("email", "Invalid email format");
        assert_eq!(error.code, "email");
        assert_eq!(error.message, "Invalid email format");
        assert!(error.field.is_none());
    }

    #[test]
    fn test_error_with_params() {
        let error = ValidationError::new("quantity", "Out of range")
            .with_param("min", "1")
            .with_param("actual", "200");

        assert_eq!(error.param("min"), Some("1"));
        assert_eq!(error.param("actual"), Some("200"));
        assert_eq!(error.param("max"), None);
    }

    #[test]
    fn test_with_message_keeps_params() {
        let error = ValidationError::out_of_range(1, 100, 200).with_message("qty out of range");
        assert_eq!(error.code, "out_of_range");
        assert_eq!(error.message, "qty out of range");
        assert_eq!(error.param("actual"), Some("200"));
    }

    #[test]
    fn test_display_with_field() {
        let error = ValidationError::new("phone", "Invalid phone").with_field("phone");
        assert_eq!(error.to_string(), "[phone] phone: Invalid phone");
    }

    #[test]
    fn test_error_collection_order() {
        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::new("email", "first").with_field("email"));
        errors.add(ValidationError::new("phone", "second").with_field("phone"));
        errors.add(ValidationError::new("url", "third").with_field("email"));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.messages(), vec!["first", "second", "third"]);
        assert_eq!(errors.for_field("email").count(), 2);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));

        let errors: ValidationErrors = vec![ValidationError::new("x", "y")].into_iter().collect();
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::new("required", "This field is required");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_aggregate_display() {
        let errors: ValidationErrors = vec![
            ValidationError::new("email", "bad email"),
            ValidationError::new("phone", "bad phone"),
        ]
        .into_iter()
        .collect();
        let text = errors.to_string();
        assert!(text.starts_with("Validation failed with 2 error(s):"));
        assert!(text.contains("2. phone: bad phone"));
    }
}
