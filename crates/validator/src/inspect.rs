//! Field inspection: reading the current value of every declared field.

use tracing::trace;

use crate::schema::{FieldDescriptor, Schema};
use crate::value::FieldValue;

// ============================================================================
// TRAITS
// ============================================================================

/// Read access to the fields of a target, by name.
///
/// Returning `None` marks the field as unreadable: it is skipped and
/// contributes neither an error nor a success. A field that exists but holds
/// no value must be reported as `Some(FieldValue::Absent)` instead.
pub trait FieldSource {
    /// Reads the current value of `field`.
    fn read_field(&self, field: &str) -> Option<FieldValue<'_>>;
}

/// A target type with a statically declared [`Schema`].
///
/// Usually implemented through [`schema!`](crate::schema!).
pub trait Inspect: FieldSource {
    /// The schema declared for this type.
    fn schema(&self) -> &'static Schema;
}

impl<T: FieldSource + ?Sized> FieldSource for &T {
    fn read_field(&self, field: &str) -> Option<FieldValue<'_>> {
        (**self).read_field(field)
    }
}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn schema(&self) -> &'static Schema {
        (**self).schema()
    }
}

// ============================================================================
// INSPECTION
// ============================================================================

/// One readable field paired with its declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InspectedField<'s, 'v> {
    /// The field's declaration.
    pub descriptor: &'s FieldDescriptor,
    /// Its current value.
    pub value: FieldValue<'v>,
}

/// Reads every field declared in `schema` from `source`, in declaration
/// order. Unreadable fields are left out.
///
/// # Examples
///
/// ```
/// use sentinel_validator::inspect::{FieldSource, inspect};
/// use sentinel_validator::schema::{RuleAttachment, Schema};
/// use sentinel_validator::value::FieldValue;
///
/// struct Pair;
///
/// impl FieldSource for Pair {
///     fn read_field(&self, field: &str) -> Option<FieldValue<'_>> {
///         (field == "left").then_some(FieldValue::Integer(1))
///     }
/// }
///
/// let schema = Schema::builder("Pair")
///     .field("left", [RuleAttachment::quantity(0, 9)])
///     .field("right", [RuleAttachment::quantity(0, 9)])
///     .build();
///
/// let fields: Vec<_> = inspect(&schema, &Pair).collect();
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].descriptor.name(), "left");
/// ```
pub fn inspect<'s, 'v, S>(
    schema: &'s Schema,
    source: &'v S,
) -> impl Iterator<Item = InspectedField<'s, 'v>>
where
    S: FieldSource + ?Sized,
{
    schema.fields().iter().filter_map(move |descriptor| {
        match source.read_field(descriptor.name()) {
            Some(value) => Some(InspectedField { descriptor, value }),
            None => {
                trace!(
                    type_name = schema.type_name(),
                    field = descriptor.name(),
                    "skipping unreadable field"
                );
                None
            }
        }
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::RuleAttachment;

    struct Sparse {
        name: Option<String>,
    }

    impl FieldSource for Sparse {
        fn read_field(&self, field: &str) -> Option<FieldValue<'_>> {
            match field {
                "name" => Some(
                    self.name
                        .as_deref()
                        .map_or(FieldValue::Absent, FieldValue::Text),
                ),
                "locked" => None,
                "count" => Some(FieldValue::Integer(4)),
                _ => None,
            }
        }
    }

    fn schema() -> Schema {
        Schema::builder("Sparse")
            .field("count", [])
            .field("locked", [RuleAttachment::email()])
            .field("name", [RuleAttachment::name(1, 50)])
            .build()
    }

    #[test]
    fn test_declaration_order_and_skips() {
        let schema = schema();
        let target = Sparse { name: None };
        let fields: Vec<_> = inspect(&schema, &target)
            .map(|f| (f.descriptor.name(), f.value))
            .collect();
        assert_eq!(
            fields,
            vec![("count", FieldValue::Integer(4)), ("name", FieldValue::Absent)]
        );
    }

    #[test]
    fn test_absent_fields_are_included() {
        let schema = schema();
        let target = Sparse {
            name: Some("Ann".to_string()),
        };
        let name = inspect(&schema, &target)
            .find(|f| f.descriptor.name() == "name")
            .map(|f| f.value);
        assert_eq!(name, Some(FieldValue::Text("Ann")));
    }

    #[test]
    fn test_dyn_source() {
        let schema = schema();
        let target = Sparse { name: None };
        let source: &dyn FieldSource = &target;
        assert_eq!(inspect(&schema, source).count(), 2);
    }
}
