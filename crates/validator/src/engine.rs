//! The validation engine: inspect, dispatch, aggregate.
//!
//! One call walks every declared field, applies every attached rule, and
//! returns either success or a single [`ValidationErrors`] holding every
//! violation in field order, then rule order. There is no fail-fast mode.

use tracing::{debug, debug_span};

use crate::dispatch::dispatch;
use crate::foundation::{ValidationError, ValidationErrors};
use crate::inspect::{FieldSource, Inspect, inspect};
use crate::schema::Schema;

// ============================================================================
// OUTCOME
// ============================================================================

/// The ordered violations of one validation call.
///
/// Empty means the target is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "an outcome may hold violations"]
pub struct ValidationOutcome {
    errors: ValidationErrors,
}

impl ValidationOutcome {
    /// Returns true when no rule was violated.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The violations, in order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        self.errors.errors()
    }

    /// The violation messages, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors.messages()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true when there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into the single aggregate failure, if any.
    ///
    /// # Errors
    ///
    /// Returns every violation as one [`ValidationErrors`] when the outcome
    /// is not empty.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        self.errors.into_result(())
    }
}

impl From<ValidationOutcome> for ValidationErrors {
    fn from(outcome: ValidationOutcome) -> Self {
        outcome.errors
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Validates `source` against `schema`, collecting every violation.
pub fn collect_with<S>(schema: &Schema, source: &S) -> ValidationOutcome
where
    S: FieldSource + ?Sized,
{
    let _span = debug_span!("validate", type_name = schema.type_name()).entered();

    let mut errors = ValidationErrors::new();
    let mut inspected = 0_usize;
    for field in inspect(schema, source) {
        inspected += 1;
        dispatch(field.descriptor, &field.value, &mut errors);
    }

    debug!(
        fields = schema.len(),
        inspected,
        violations = errors.len(),
        "validation finished"
    );

    ValidationOutcome { errors }
}

/// Validates `source` against `schema`.
///
/// # Errors
///
/// Returns one [`ValidationErrors`] carrying every violation.
pub fn validate_with<S>(schema: &Schema, source: &S) -> Result<(), ValidationErrors>
where
    S: FieldSource + ?Sized,
{
    collect_with(schema, source).into_result()
}

/// Validates `target` against its declared schema, collecting every violation.
pub fn collect<T>(target: &T) -> ValidationOutcome
where
    T: Inspect + ?Sized,
{
    collect_with(target.schema(), target)
}

/// Validates `target` against its declared schema.
///
/// # Errors
///
/// Returns one [`ValidationErrors`] carrying every violation, in field
/// declaration order, then rule order within each field.
///
/// # Examples
///
/// ```
/// use sentinel_validator::schema;
/// use sentinel_validator::schema::RuleAttachment;
///
/// schema! {
///     pub struct Contact {
///         #[rule(RuleAttachment::email().with_message("bad email"))]
///         pub email: String,
///         #[rule(RuleAttachment::phone().with_message("bad phone"))]
///         pub phone: String,
///     }
/// }
///
/// let contact = Contact { email: "nope".into(), phone: "123".into() };
/// let errors = sentinel_validator::validate(&contact).unwrap_err();
/// assert_eq!(errors.messages(), vec!["bad email", "bad phone"]);
/// ```
pub fn validate<T>(target: &T) -> Result<(), ValidationErrors>
where
    T: Inspect + ?Sized,
{
    collect(target).into_result()
}

// ============================================================================
// TESTS
// ============================================================================
