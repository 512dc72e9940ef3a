//! Built-in validators
//!
//! One pure predicate per rule kind. Each is a [`Validate`](crate::foundation::Validate)
//! implementor that can be used on its own or through a rule attachment.
//!
//! # Categories
//!
//! - **Content**: [`Email`], [`Url`]
//! - **Identity**: [`Phone`], [`IdCard`], [`PostalCode`]
//! - **Length**: [`LengthRange`] (name, address)
//! - **Numeric**: [`InRange`] (price, quantity), [`DecimalPrecision`]
//! - **Temporal**: [`DateTimeRange`], [`DatePattern`]
//! - **Files**: [`FileConstraint`]
//! - **Credentials**: [`Password`]
//! - **Enumerations**: [`EnumMember`]
//!
//! # Examples
//!
//! ```
//! use sentinel_validator::foundation::Validate;
//! use sentinel_validator::validators::{email, in_range, length_range};
//!
//! assert!(email().is_valid("163adb@163.com"));
//! assert!(length_range(1, 50).is_valid("张三"));
//! assert!(in_range(1_i64, 100).is_valid(&80));
//! ```

pub mod content;
pub mod date_pattern;
pub mod datetime;
pub mod decimal;
pub mod enumeration;
pub mod file;
pub mod identity;
pub mod length;
pub mod password;
pub mod phone;
pub mod range;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use content::{Email, Url, email, url};
pub use date_pattern::{DateParseError, DatePattern, PatternError, PatternKind};
pub use datetime::DateTimeRange;
pub use decimal::{DecimalPrecision, DigitCounts, decimal_precision};
pub use enumeration::{EnumMember, enum_member};
pub use file::FileConstraint;
pub use identity::{IdCard, PostalCode, id_card, postal_code};
pub use length::{LengthRange, length_range};
pub use password::{CharCategory, Password};
pub use phone::{Phone, phone};
pub use range::{InRange, in_range};
