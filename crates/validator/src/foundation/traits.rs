//! Core traits for the validation system

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The trait every rule predicate in the validator library implements.
///
/// Validators are generic over their input type and stateless beyond their
/// declared parameters: the same input always yields the same result, so one
/// instance can be shared across any number of threads.
///
/// # Examples
///
/// ```
/// use sentinel_validator::foundation::{Validate, ValidationError};
///
/// struct NotBlank;
///
/// impl Validate for NotBlank {
///     type Input = str;
///
///     fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
///         if input.trim().is_empty() {
///             Err(ValidationError::new("not_blank", "must not be blank"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NotBlank.is_valid("x"));
/// assert!(!NotBlank.is_valid("   "));
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str` and `[u8]`.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if validation succeeds
    /// * `Err(ValidationError)` describing why it did not
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Predicate form of [`validate`](Self::validate).
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysValid;

    impl Validate for AlwaysValid {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Ok(())
        }
    }

    struct AlwaysFails;

    impl Validate for AlwaysFails {
        type Input = str;

        fn validate(&self, _input: &Self::Input) -> Result<(), ValidationError> {
            Err(ValidationError::new("always_fails", "Always fails"))
        }
    }

    #[test]
    fn test_validator_trait() {
        assert!(AlwaysValid.validate("test").is_ok());
        assert!(AlwaysFails.validate("test").is_err());
    }

    #[test]
    fn test_is_valid_through_reference() {
        let validator = &AlwaysValid;
        assert!(validator.is_valid("test"));
        let dyn_validator: &dyn Validate<Input = str> = &AlwaysFails;
        assert!(!dyn_validator.is_valid("test"));
    }
}
