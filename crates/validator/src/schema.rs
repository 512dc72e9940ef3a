//! Rule declarations and the per-type field registry.
//!
//! A [`Schema`] is the static, immutable registry for one target type: the
//! ordered list of its fields, each with the ordered [`RuleAttachment`]s
//! declared on it. Schemas are built once, either in code through
//! [`Schema::builder`] (or the [`schema!`](crate::schema!) macro) or loaded
//! from configuration with [`Schema::from_json_str`] / [`Schema::from_toml_str`].
//!
//! # Configuration format
//!
//! ```toml
//! type_name = "Product"
//!
//! [[fields]]
//! name = "price"
//!
//! [[fields.rules]]
//! kind = "price"
//! min = "0.01"
//! max = "999999.99"
//! message = "price must be between 0.01 and 999999.99"
//!
//! [[fields.rules]]
//! kind = "decimal"
//! integer_part = 6
//! fraction_part = 2
//! ```
//!
//! Parameters left out take the documented defaults of their rule kind.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validators::{
    DateTimeRange, DecimalPrecision, EnumMember, FileConstraint, Password, PatternError,
};
use crate::value::EnumMembers;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while building or loading a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The JSON document is malformed or does not describe a schema.
    #[cfg(feature = "json")]
    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML document is malformed or does not describe a schema.
    #[cfg(feature = "toml")]
    #[error("invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two fields share a name.
    #[error("field `{field}` is declared more than once in `{type_name}`")]
    DuplicateField {
        /// The target type.
        type_name: String,
        /// The repeated field name.
        field: String,
    },

    /// A field has an empty name.
    #[error("`{type_name}` declares a field with an empty name")]
    EmptyFieldName {
        /// The target type.
        type_name: String,
    },

    /// A rule's lower bound exceeds its upper bound.
    #[error("field `{field}`: {kind} rule has min {min} greater than max {max}")]
    InvalidBounds {
        /// The field carrying the rule.
        field: String,
        /// Rule kind code.
        kind: &'static str,
        /// Declared lower bound.
        min: String,
        /// Declared upper bound.
        max: String,
    },
}

// ============================================================================
// DEFAULTS
// ============================================================================

mod defaults {
    pub(super) const NAME_MIN: usize = 1;
    pub(super) const NAME_MAX: usize = 50;
    pub(super) const ADDRESS_MIN: usize = 5;
    pub(super) const ADDRESS_MAX: usize = 200;
    pub(super) const DATE_PATTERN: &str = "yyyy-MM-dd";

    pub(super) fn name_min() -> usize {
        NAME_MIN
    }

    pub(super) fn name_max() -> usize {
        NAME_MAX
    }

    pub(super) fn address_min() -> usize {
        ADDRESS_MIN
    }

    pub(super) fn address_max() -> usize {
        ADDRESS_MAX
    }

    pub(super) fn date_pattern() -> String {
        DATE_PATTERN.to_string()
    }
}

// ============================================================================
// RULE
// ============================================================================

/// One rule kind together with its parameters.
///
/// Bounds of `None` are unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// `local@domain` email shape.
    Email,
    /// 11-digit mobile number.
    Phone,
    /// 15- or 18-character resident ID number.
    IdCard,
    /// Inclusive exact-decimal range.
    Price {
        /// Lower bound, default `0`.
        #[serde(default)]
        min: Decimal,
        /// Upper bound.
        #[serde(default)]
        max: Option<Decimal>,
    },
    /// Inclusive integer range.
    Quantity {
        /// Lower bound, default `0`.
        #[serde(default)]
        min: i64,
        /// Upper bound.
        #[serde(default)]
        max: Option<i64>,
    },
    /// Six-digit postal code.
    PostalCode,
    /// Character length range, default `1..=50`.
    Name {
        /// Minimum chars.
        #[serde(default = "defaults::name_min")]
        min_length: usize,
        /// Maximum chars.
        #[serde(default = "defaults::name_max")]
        max_length: usize,
    },
    /// Character length range, default `5..=200`.
    Address {
        /// Minimum chars.
        #[serde(default = "defaults::address_min")]
        min_length: usize,
        /// Maximum chars.
        #[serde(default = "defaults::address_max")]
        max_length: usize,
    },
    /// Integer and fraction digit limits.
    Decimal(DecimalPrecision),
    /// Date string parsed with a pattern, within optional bounds.
    DateTimeRange(DateRangeRule),
    /// `http`, `https` or `ftp` URL.
    Url,
    /// File size cap and MIME allow-list.
    FileConstraint(FileConstraint),
    /// Password length and character categories.
    Password(Password),
    /// Membership in a named set of enumeration members.
    EnumMembership(EnumMember),
}

impl Rule {
    /// Stable code of the rule kind, used as the violation code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::IdCard => "id_card",
            Self::Price { .. } => "price",
            Self::Quantity { .. } => "quantity",
            Self::PostalCode => "postal_code",
            Self::Name { .. } => "name",
            Self::Address { .. } => "address",
            Self::Decimal(_) => "decimal",
            Self::DateTimeRange(_) => "date_time_range",
            Self::Url => "url",
            Self::FileConstraint(_) => "file_constraint",
            Self::Password(_) => "password",
            Self::EnumMembership(_) => "enum_membership",
        }
    }

    /// Message used when the declaration does not supply one.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Email => "Invalid email format",
            Self::Phone => "Invalid phone number format",
            Self::IdCard => "Invalid ID card number format",
            Self::Price { .. } => "Price is out of range",
            Self::Quantity { .. } => "Quantity is out of range",
            Self::PostalCode => "Invalid postal code format",
            Self::Name { .. } => "Name length is out of range",
            Self::Address { .. } => "Address length is out of range",
            Self::Decimal(_) => "Decimal precision is out of range",
            Self::DateTimeRange(_) => "Invalid date format or date out of range",
            Self::Url => "Invalid URL format",
            Self::FileConstraint(_) => "File does not meet the constraints",
            Self::Password(_) => "Password does not meet the complexity requirements",
            Self::EnumMembership(_) => "Value is not a valid enumeration member",
        }
    }

    /// Checks that every lower bound is at most its upper bound.
    fn check_bounds(&self, field: &str) -> Result<(), SchemaError> {
        let inverted = |min: String, max: String| SchemaError::InvalidBounds {
            field: field.to_string(),
            kind: self.code(),
            min,
            max,
        };

        match self {
            Self::Price { min, max: Some(max) } if min > max => {
                Err(inverted(min.to_string(), max.to_string()))
            }
            Self::Quantity { min, max: Some(max) } if min > max => {
                Err(inverted(min.to_string(), max.to_string()))
            }
            Self::Name {
                min_length,
                max_length,
            }
            | Self::Address {
                min_length,
                max_length,
            } if min_length > max_length => {
                Err(inverted(min_length.to_string(), max_length.to_string()))
            }
            Self::Password(policy) if policy.min_length > policy.max_length => Err(inverted(
                policy.min_length.to_string(),
                policy.max_length.to_string(),
            )),
            _ => Ok(()),
        }
    }
}

// ============================================================================
// DATE RANGE PARAMETERS
// ============================================================================

/// Declared parameters of a date-time range rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeParams {
    /// Pattern in the `yyyy-MM-dd HH:mm:ss` letter language.
    #[serde(default = "defaults::date_pattern")]
    pub pattern: String,
    /// Lower bound; empty means unbounded.
    #[serde(default)]
    pub min: String,
    /// Upper bound; empty means unbounded.
    #[serde(default)]
    pub max: String,
}

/// A date-time range rule, compiled once when declared or loaded.
///
/// A pattern or bound that does not compile is kept as the compile error;
/// every check of the rule then fails with reason `invalid_pattern`.
///
/// # Examples
///
/// ```
/// use sentinel_validator::schema::DateRangeRule;
///
/// let rule = DateRangeRule::new("yyyy-MM-dd", "2020-01-01", "");
/// assert!(rule.compiled().is_ok());
///
/// let broken = DateRangeRule::new("yyyy-QQ", "", "");
/// assert!(broken.compiled().is_err());
/// assert_eq!(broken.params().pattern, "yyyy-QQ");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DateRangeParams", into = "DateRangeParams")]
pub struct DateRangeRule {
    params: DateRangeParams,
    compiled: Result<DateTimeRange, PatternError>,
}

impl DateRangeRule {
    /// Compiles `pattern` and both bounds.
    pub fn new(
        pattern: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self::from(DateRangeParams {
            pattern: pattern.into(),
            min: min.into(),
            max: max.into(),
        })
    }

    /// The declared parameters.
    #[must_use]
    pub fn params(&self) -> &DateRangeParams {
        &self.params
    }

    /// The compiled validator, or why it did not compile.
    pub fn compiled(&self) -> Result<&DateTimeRange, &PatternError> {
        self.compiled.as_ref()
    }
}

impl From<DateRangeParams> for DateRangeRule {
    fn from(params: DateRangeParams) -> Self {
        let compiled = DateTimeRange::new(&params.pattern, &params.min, &params.max);
        Self { params, compiled }
    }
}

impl From<DateRangeRule> for DateRangeParams {
    fn from(rule: DateRangeRule) -> Self {
        rule.params
    }
}

// ============================================================================
// RULE ATTACHMENT
// ============================================================================

/// One declared application of a rule kind to a field.
///
/// Immutable once declared. The message falls back to the rule kind's
/// default when none is given.
///
/// # Examples
///
/// ```
/// use sentinel_validator::schema::RuleAttachment;
///
/// let rule = RuleAttachment::quantity(1, 100);
/// assert_eq!(rule.message(), "Quantity is out of range");
///
/// let rule = rule.with_message("qty must be 1..=100");
/// assert_eq!(rule.message(), "qty must be 1..=100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAttachment {
    #[serde(flatten)]
    rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<Cow<'static, str>>,
}

impl RuleAttachment {
    /// Attaches `rule` with its default message.
    #[must_use]
    pub const fn new(rule: Rule) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    /// Overrides the message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The attached rule.
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The declared message, or the rule kind's default.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .unwrap_or_else(|| self.rule.default_message())
    }

    pub(crate) fn message_cow(&self) -> Cow<'static, str> {
        self.message
            .clone()
            .unwrap_or(Cow::Borrowed(self.rule.default_message()))
    }

    /// Email shape.
    #[must_use]
    pub const fn email() -> Self {
        Self::new(Rule::Email)
    }

    /// Mobile number.
    #[must_use]
    pub const fn phone() -> Self {
        Self::new(Rule::Phone)
    }

    /// Resident ID number.
    #[must_use]
    pub const fn id_card() -> Self {
        Self::new(Rule::IdCard)
    }

    /// Postal code.
    #[must_use]
    pub const fn postal_code() -> Self {
        Self::new(Rule::PostalCode)
    }

    /// URL.
    #[must_use]
    pub const fn url() -> Self {
        Self::new(Rule::Url)
    }

    /// Price within `min..=max`.
    #[must_use]
    pub const fn price(min: Decimal, max: Decimal) -> Self {
        Self::new(Rule::Price {
            min,
            max: Some(max),
        })
    }

    /// Price of at least `min`, no upper bound.
    #[must_use]
    pub const fn price_at_least(min: Decimal) -> Self {
        Self::new(Rule::Price { min, max: None })
    }

    /// Quantity within `min..=max`.
    #[must_use]
    pub const fn quantity(min: i64, max: i64) -> Self {
        Self::new(Rule::Quantity {
            min,
            max: Some(max),
        })
    }

    /// Quantity of at least `min`, no upper bound.
    #[must_use]
    pub const fn quantity_at_least(min: i64) -> Self {
        Self::new(Rule::Quantity { min, max: None })
    }

    /// Name of `min_length..=max_length` chars.
    #[must_use]
    pub const fn name(min_length: usize, max_length: usize) -> Self {
        Self::new(Rule::Name {
            min_length,
            max_length,
        })
    }

    /// Address of `min_length..=max_length` chars.
    #[must_use]
    pub const fn address(min_length: usize, max_length: usize) -> Self {
        Self::new(Rule::Address {
            min_length,
            max_length,
        })
    }

    /// At most `integer_part` integer digits and `fraction_part` fraction digits.
    #[must_use]
    pub const fn decimal(integer_part: u32, fraction_part: u32) -> Self {
        Self::new(Rule::Decimal(DecimalPrecision {
            integer_part: Some(integer_part),
            fraction_part: Some(fraction_part),
        }))
    }

    /// Date parsed with `pattern` within `min..=max`; empty bounds are open.
    #[must_use]
    pub fn date_time_range(
        pattern: impl Into<String>,
        min: impl Into<String>,
        max: impl Into<String>,
    ) -> Self {
        Self::new(Rule::DateTimeRange(DateRangeRule::new(pattern, min, max)))
    }

    /// Date parsed with `pattern`, unbounded.
    #[must_use]
    pub fn date(pattern: impl Into<String>) -> Self {
        Self::date_time_range(pattern, "", "")
    }

    /// File at most `max_size_kb` KiB with one of `allowed_types`.
    #[must_use]
    pub fn file<S: Into<String>>(
        max_size_kb: u64,
        allowed_types: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(Rule::FileConstraint(FileConstraint::new(
            Some(max_size_kb),
            allowed_types.into_iter().map(Into::into).collect(),
        )))
    }

    /// Password with the default policy.
    #[must_use]
    pub fn password() -> Self {
        Self::new(Rule::Password(Password::new()))
    }

    /// Password with a custom policy.
    #[must_use]
    pub const fn password_with(policy: Password) -> Self {
        Self::new(Rule::Password(policy))
    }

    /// Member of the enumeration `E`.
    #[must_use]
    pub fn enum_of<E: EnumMembers>() -> Self {
        Self::new(Rule::EnumMembership(EnumMember::of::<E>()))
    }
}

impl From<Rule> for RuleAttachment {
    fn from(rule: Rule) -> Self {
        Self::new(rule)
    }
}

impl fmt::Display for RuleAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule.code(), self.message())
    }
}

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// A field name plus the rules attached to it, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    #[serde(default)]
    rules: Vec<RuleAttachment>,
}

impl FieldDescriptor {
    /// Creates a descriptor.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        rules: impl IntoIterator<Item = RuleAttachment>,
    ) -> Self {
        Self {
            name: name.into(),
            rules: rules.into_iter().collect(),
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attached rules.
    #[must_use]
    pub fn rules(&self) -> &[RuleAttachment] {
        &self.rules
    }

    pub(crate) fn name_cow(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

/// The ordered field registry of one target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    type_name: Cow<'static, str>,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Starts a schema for `type_name`.
    pub fn builder(type_name: impl Into<Cow<'static, str>>) -> SchemaBuilder {
        SchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// The target type's name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Every declared field, in order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when no field is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of rule attachments across all fields.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|field| field.rules.len()).sum()
    }

    /// Checks field names and rule bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] on an empty or repeated field name, or a rule
    /// whose lower bound exceeds its upper bound.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    type_name: self.type_name.to_string(),
                });
            }
            if !seen.insert(field.name()) {
                return Err(SchemaError::DuplicateField {
                    type_name: self.type_name.to_string(),
                    field: field.name.to_string(),
                });
            }
            for attachment in &field.rules {
                attachment.rule.check_bounds(field.name())?;
            }
        }
        Ok(())
    }

    /// Loads and checks a schema from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] on malformed input, or any error of
    /// [`Schema::check`].
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(json)?;
        schema.check()?;
        debug!(
            type_name = %schema.type_name,
            fields = schema.len(),
            rules = schema.rule_count(),
            "loaded schema from JSON"
        );
        Ok(schema)
    }

    /// Loads and checks a schema from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Toml`] on malformed input, or any error of
    /// [`Schema::check`].
    #[cfg(feature = "toml")]
    pub fn from_toml_str(toml: &str) -> Result<Self, SchemaError> {
        let schema: Self = toml::from_str(toml)?;
        schema.check()?;
        debug!(
            type_name = %schema.type_name,
            fields = schema.len(),
            rules = schema.rule_count(),
            "loaded schema from TOML"
        );
        Ok(schema)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Schema`].
///
/// # Examples
///
/// ```
/// use sentinel_validator::schema::{RuleAttachment, Schema};
///
/// let schema = Schema::builder("UserDto")
///     .field("email", [RuleAttachment::email()])
///     .field("qty", [RuleAttachment::quantity(1, 100)])
///     .try_build()
///     .unwrap();
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Clone)]
#[must_use = "builder does nothing until .build() is called"]
pub struct SchemaBuilder {
    type_name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Declares the next field with its rules.
    pub fn field(
        mut self,
        name: impl Into<Cow<'static, str>>,
        rules: impl IntoIterator<Item = RuleAttachment>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, rules));
        self
    }

    /// Builds the schema without checking it.
    ///
    /// Inverted bounds make the affected rule fail on every value.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema {
            type_name: self.type_name,
            fields: self.fields,
        }
    }

    /// Builds and checks the schema.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Schema::check`].
    pub fn try_build(self) -> Result<Schema, SchemaError> {
        let schema = self.build();
        schema.check()?;
        debug!(
            type_name = %schema.type_name,
            fields = schema.len(),
            rules = schema.rule_count(),
            "built schema"
        );
        Ok(schema)
    }
}

// ============================================================================
// TESTS
// ============================================================================
