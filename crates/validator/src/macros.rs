//! Macros for declaring validators, schemas and enum field types.
//!
//! # Available Macros
//!
//! - [`validator!`]: creates a complete validator (struct + `Validate` impl + factory fn)
//! - [`schema!`]: declares a struct together with the rules attached to each field
//! - [`field_enum!`]: declares a fieldless enum usable with enum membership rules
//!
//! # Examples
//!
//! ```
//! use sentinel_validator::{field_enum, schema};
//! use sentinel_validator::schema::RuleAttachment;
//!
//! field_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Gender { Male, Female }
//! }
//!
//! schema! {
//!     #[derive(Debug, Default)]
//!     pub struct Signup {
//!         #[rule(RuleAttachment::email())]
//!         pub email: Option<String>,
//!         #[rule(RuleAttachment::enum_of::<Gender>())]
//!         pub gender: Option<Gender>,
//!         pub nickname: String,
//!     }
//! }
//!
//! let signup = Signup {
//!     email: Some("a@b".into()),
//!     gender: Some(Gender::Female),
//!     nickname: String::new(),
//! };
//! assert!(sentinel_validator::validate(&signup).is_ok());
//! ```

// ============================================================================
// VALIDATOR MACRO
// ============================================================================

/// Creates a complete validator: struct definition, `Validate` implementation,
/// constructor, and factory function.
///
/// `#[derive(Debug, Clone)]` is always applied. Add extra derives via `#[derive(...)]`.
///
/// # Variants
///
/// **Unit validator** (zero-sized, no fields):
/// ```rust,ignore
/// validator! {
///     pub PostalCode for str;
///     rule(input) { POSTAL_CODE_REGEX.is_match(input) }
///     error(input) { ValidationError::invalid_format("postal_code") }
///     fn postal_code();
/// }
/// ```
///
/// **Struct with fields** (auto `new` from all fields):
/// ```rust,ignore
/// validator! {
///     pub MimeAllowed { types: Vec<String> } for str;
///     rule(self, input) { self.types.iter().any(|t| t.eq_ignore_ascii_case(input)) }
///     error(self, input) { ValidationError::new("mime_type", "not allowed") }
///     fn mime_allowed(types: Vec<String>);
/// }
/// ```
///
/// **Generic validator**:
/// ```rust,ignore
/// validator! {
///     #[derive(Copy, PartialEq, Eq, Hash)]
///     pub InRange<T: PartialOrd + Display + Copy> { min: T, max: T } for T;
///     rule(self, input) { *input >= self.min && *input <= self.max }
///     error(self, input) { ValidationError::out_of_range(self.min, self.max, *input) }
///     fn in_range(min: T, max: T);
/// }
/// ```
#[macro_export]
macro_rules! validator {
    // ── Variant 1a: Unit validator (no fields) + factory fn ──────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name for $input;
            rule($inp) $rule
            error($einp) $err
        }

        #[must_use]
        $vis const fn $factory() -> $name { $name }
    };

    // ── Variant 1b: Unit validator (no fields), no factory ───────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&self, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Variant 2a: Struct with fields + auto new + factory fn ───────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // ── Variant 2b: Struct with fields + auto new, no factory ────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };

    // ── Variant 4a: Generic struct + auto new + factory fn ───────────────
    //
    // Supports a single generic type parameter with one or more trait bounds.
    // Bounds must be simple identifiers (use imports for paths).
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident: $first_bound:ident $(+ $rest_bound:ident)*>
            { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator! {
            $(#[$meta])*
            $vis $name<$gen: $first_bound $(+ $rest_bound)*>
                { $($field: $fty),+ } for $input;
            rule($self_, $inp) $rule
            error($self2, $einp) $err
        }

        #[must_use]
        $vis fn $factory<$gen: $first_bound $(+ $rest_bound)*>($($farg: $faty),*) -> $name<$gen> {
            $name::new($($farg),*)
        }
    };

    // ── Variant 4b: Generic struct + auto new, no factory ────────────────
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident<$gen:ident: $first_bound:ident $(+ $rest_bound:ident)*>
            { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name<$gen> {
            $(pub $field: $fty,)+
        }

        impl<$gen: $first_bound $(+ $rest_bound)*> $name<$gen> {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl<$gen: $first_bound $(+ $rest_bound)*> $crate::foundation::Validate for $name<$gen> {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}

// ============================================================================
// SCHEMA MACRO
// ============================================================================

/// Declares a struct together with the rules attached to each of its fields.
///
/// Generates the struct, a [`FieldSource`](crate::inspect::FieldSource) impl
/// that reads every field through [`AsFieldValue`](crate::value::AsFieldValue),
/// and an [`Inspect`](crate::inspect::Inspect) impl whose [`Schema`](crate::schema::Schema)
/// is built once, on first use, and shared by every instance afterwards.
///
/// Fields accept doc comments followed by `#[rule(...)]` attributes; each
/// rule takes an expression evaluating to a
/// [`RuleAttachment`](crate::schema::RuleAttachment). Rules run in the order
/// written. Fields without rules are still declared in the schema.
///
/// ```
/// use sentinel_validator::schema;
/// use sentinel_validator::schema::RuleAttachment;
///
/// schema! {
///     pub struct Order {
///         #[rule(RuleAttachment::quantity(1, 100).with_message("qty must be 1..=100"))]
///         pub qty: i64,
///     }
/// }
///
/// let err = sentinel_validator::validate(&Order { qty: 200 }).unwrap_err();
/// assert_eq!(err.messages(), vec!["qty must be 1..=100"]);
/// ```
#[macro_export]
macro_rules! schema {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:expr])*
                $(#[rule($rule:expr)])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[doc = $doc])* $fvis $field: $fty, )*
        }

        impl $crate::inspect::FieldSource for $name {
            fn read_field(
                &self,
                field: &str,
            ) -> ::std::option::Option<$crate::value::FieldValue<'_>> {
                match field {
                    $(
                        stringify!($field) => ::std::option::Option::Some(
                            $crate::value::AsFieldValue::as_field_value(&self.$field),
                        ),
                    )*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl $crate::inspect::Inspect for $name {
            fn schema(&self) -> &'static $crate::schema::Schema {
                static SCHEMA: ::std::sync::LazyLock<$crate::schema::Schema> =
                    ::std::sync::LazyLock::new(|| {
                        $crate::schema::Schema::builder(stringify!($name))
                            $( .field(stringify!($field), ::std::vec![$($rule),*]) )*
                            .build()
                    });
                &SCHEMA
            }
        }
    };
}

// ============================================================================
// FIELD ENUM MACRO
// ============================================================================

/// Declares a fieldless enum whose members can be checked by enum
/// membership rules.
///
/// Implements [`EnumMembers`](crate::value::EnumMembers) (member names are
/// the variant identifiers, case preserved) and
/// [`AsFieldValue`](crate::value::AsFieldValue).
#[macro_export]
macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::value::EnumMembers for $name {
            const MEMBERS: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn member_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => stringify!($variant), )+
                }
            }
        }

        impl $crate::value::AsFieldValue for $name {
            fn as_field_value(&self) -> $crate::value::FieldValue<'_> {
                $crate::value::FieldValue::Enum($crate::value::EnumMembers::member_name(self))
            }
        }
    };
}

// ============================================================================
// TESTS
// ============================================================================
