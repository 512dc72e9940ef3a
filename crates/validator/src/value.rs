//! Typed field values.
//!
//! A [`FieldValue`] is the runtime value read from one field of a target,
//! tagged by shape. Rule kinds check the shape explicitly before applying
//! their predicate; a value of the wrong shape is a rule violation.
//!
//! [`AsFieldValue`] converts ordinary Rust field types into a `FieldValue`
//! borrowing from the target.

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;
use rust_decimal::Decimal;

// ============================================================================
// FIELD VALUE
// ============================================================================

/// The current value of one field, tagged by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// No value (`None`, JSON `null`, or a missing key).
    Absent,
    /// A string.
    Text(&'a str),
    /// A whole number.
    Integer(i64),
    /// An exact decimal number.
    Decimal(Decimal),
    /// A boolean.
    Bool(bool),
    /// Uploaded file content.
    File(&'a FileData),
    /// A member of a [`field_enum!`](crate::field_enum) enumeration, by name.
    Enum(&'static str),
    /// A value no rule kind accepts; carries a short description of its type.
    Opaque(&'static str),
}

impl FieldValue<'_> {
    /// Short name of the value's shape, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Bool(_) => "bool",
            Self::File(_) => "file",
            Self::Enum(_) => "enum",
            Self::Opaque(kind) => *kind,
        }
    }

    /// Returns true for [`FieldValue::Absent`].
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The string form of a scalar value: text as-is, enum member names,
    /// and the canonical rendering of numbers and booleans.
    ///
    /// Absent values, files and opaque values have no string form.
    #[must_use]
    pub fn string_form(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) => Some(Cow::Borrowed(text)),
            Self::Enum(name) => Some(Cow::Borrowed(name)),
            Self::Integer(n) => Some(Cow::Owned(n.to_string())),
            Self::Decimal(d) => Some(Cow::Owned(d.to_string())),
            Self::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Absent | Self::File(_) | Self::Opaque(_) => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.string_form() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{}>", self.kind()),
        }
    }
}

// ============================================================================
// FILE DATA
// ============================================================================

/// Binary content plus a MIME-type label, supplied by the caller.
///
/// Validators only read it. Either part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileData {
    content: Option<Bytes>,
    mime_type: Option<String>,
}

impl FileData {
    /// Creates file data with content and a MIME type.
    pub fn new(content: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            mime_type: Some(mime_type.into()),
        }
    }

    /// Creates file data with content and no MIME type.
    pub fn from_content(content: impl Into<Bytes>) -> Self {
        Self {
            content: Some(content.into()),
            mime_type: None,
        }
    }

    /// Sets the MIME type.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// The file content, if present.
    #[must_use]
    pub fn content(&self) -> Option<&Bytes> {
        self.content.as_ref()
    }

    /// The MIME type label, if present.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Content length in bytes; zero when content is missing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.as_ref().map_or(0, Bytes::len)
    }

    /// Returns true when content is missing or empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// ENUM MEMBERS
// ============================================================================

/// A fieldless enumeration whose members are identified by name.
///
/// Implemented by [`field_enum!`](crate::field_enum).
pub trait EnumMembers {
    /// Every member name, in declaration order.
    const MEMBERS: &'static [&'static str];

    /// This member's name.
    fn member_name(&self) -> &'static str;
}

// ============================================================================
// CONVERSION TRAIT
// ============================================================================

/// Conversion of a field into a [`FieldValue`] borrowing from it.
pub trait AsFieldValue {
    /// Reads the current value.
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for str {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl AsFieldValue for String {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self.as_str())
    }
}

impl AsFieldValue for Cow<'_, str> {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self.as_ref())
    }
}

impl AsFieldValue for bool {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl AsFieldValue for Decimal {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Decimal(*self)
    }
}

impl AsFieldValue for FileData {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::File(self)
    }
}

macro_rules! impl_lossless_integer {
    ($($ty:ty),+) => {
        $(
            impl AsFieldValue for $ty {
                #[inline]
                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Integer(i64::from(*self))
                }
            }
        )+
    };
}

impl_lossless_integer!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_wide_integer {
    ($($ty:ty),+) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    match i64::try_from(*self) {
                        Ok(n) => FieldValue::Integer(n),
                        Err(_) => FieldValue::Decimal(Decimal::from(*self)),
                    }
                }
            }
        )+
    };
}

impl_wide_integer!(u64, usize);

macro_rules! impl_float {
    ($($ty:ty),+) => {
        $(
            impl AsFieldValue for $ty {
                fn as_field_value(&self) -> FieldValue<'_> {
                    Decimal::try_from(*self).map_or(FieldValue::Opaque("float"), FieldValue::Decimal)
                }
            }
        )+
    };
}

impl_float!(f32, f64);

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        self.as_ref().map_or(FieldValue::Absent, AsFieldValue::as_field_value)
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for &T {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue + ?Sized> AsFieldValue for Box<T> {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T> AsFieldValue for Vec<T> {
    #[inline]
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Opaque("sequence")
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!("abc".as_field_value(), FieldValue::Text("abc"));
        assert_eq!(String::from("abc").as_field_value(), FieldValue::Text("abc"));
        assert_eq!(7_u8.as_field_value(), FieldValue::Integer(7));
        assert_eq!((-7_i32).as_field_value(), FieldValue::Integer(-7));
        assert_eq!(true.as_field_value(), FieldValue::Bool(true));
        assert_eq!(
            Decimal::from_str("1.50").unwrap().as_field_value(),
            FieldValue::Decimal(Decimal::from_str("1.50").unwrap())
        );
    }

    #[test]
    fn test_wide_integers_fall_back_to_decimal() {
        assert_eq!(42_u64.as_field_value(), FieldValue::Integer(42));
        assert_eq!(
            u64::MAX.as_field_value(),
            FieldValue::Decimal(Decimal::from(u64::MAX))
        );
    }

    #[test]
    fn test_floats_become_decimal() {
        assert_eq!(
            0.5_f64.as_field_value(),
            FieldValue::Decimal(Decimal::from_str("0.5").unwrap())
        );
        assert_eq!(f64::NAN.as_field_value(), FieldValue::Opaque("float"));
    }

    #[test]
    fn test_option_and_wrappers() {
        let none: Option<String> = None;
        assert!(none.as_field_value().is_absent());
        assert_eq!(Some(3_i64).as_field_value(), FieldValue::Integer(3));
        assert_eq!(Box::new("x").as_field_value(), FieldValue::Text("x"));
        assert_eq!(vec![1, 2].as_field_value().kind(), "sequence");
    }

    #[test]
    fn test_string_form() {
        assert_eq!(FieldValue::Integer(12).string_form().as_deref(), Some("12"));
        assert_eq!(FieldValue::Bool(false).string_form().as_deref(), Some("false"));
        assert_eq!(FieldValue::Enum("HIGH").string_form().as_deref(), Some("HIGH"));
        assert_eq!(FieldValue::Absent.string_form(), None);
        assert_eq!(FieldValue::Absent.to_string(), "<absent>");
    }

    #[test]
    fn test_file_data_accessors() {
        let file = FileData::new(vec![1_u8, 2, 3], "image/png");
        assert_eq!(file.len(), 3);
        assert_eq!(file.mime_type(), Some("image/png"));
        assert!(FileData::default().content().is_none());
        assert!(FileData::default().is_empty());
        assert_eq!(
            FileData::from_content(Bytes::from_static(b"x"))
                .with_mime_type("text/plain")
                .mime_type(),
            Some("text/plain")
        );
    }
}
