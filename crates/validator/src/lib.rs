//! # sentinel-validator
//!
//! Per-field rule validation with complete error aggregation.
//!
//! A target type declares, for each field, an ordered list of rules (email,
//! phone, price range, decimal precision, date range, password complexity,
//! file constraints, enum membership, ...). One call to [`validate`] checks
//! every rule on every field and reports *all* violations at once, in field
//! order then rule order, as a single [`ValidationErrors`](foundation::ValidationErrors).
//!
//! ## Quick Start
//!
//! ```
//! use sentinel_validator::schema;
//! use sentinel_validator::schema::RuleAttachment;
//!
//! schema! {
//!     #[derive(Debug)]
//!     pub struct UserDto {
//!         #[rule(RuleAttachment::email().with_message("invalid email"))]
//!         pub email: String,
//!         #[rule(RuleAttachment::phone().with_message("invalid phone"))]
//!         pub phone: String,
//!         #[rule(RuleAttachment::quantity(1, 100).with_message("qty must be 1-100"))]
//!         pub qty: i32,
//!         #[rule(RuleAttachment::password().with_message("weak password"))]
//!         pub password: String,
//!     }
//! }
//!
//! let mut user = UserDto {
//!     email: "163adb@163.com".into(),
//!     phone: "13433334555".into(),
//!     qty: 80,
//!     password: "DO27^dsfHJKEWA".into(),
//! };
//! assert!(sentinel_validator::validate(&user).is_ok());
//!
//! user.qty = 200;
//! let errors = sentinel_validator::validate(&user).unwrap_err();
//! assert_eq!(errors.messages(), vec!["qty must be 1-100"]);
//! ```
//!
//! ## Layers
//!
//! - [`validators`]: one pure predicate per rule kind
//! - [`schema`]: rule declarations and the per-type field registry
//! - [`inspect`]: reading field values from a target
//! - [`dispatch`]: applying the rules of one field
//! - [`engine`]: orchestration and aggregation
//!
//! Schemas can also be loaded from JSON or TOML and applied to any
//! [`FieldSource`](inspect::FieldSource), including `serde_json::Value`
//! (feature `json`).

// ValidationError is the fundamental error type for all validators;
// boxing it would add indirection to every rule check.
#![allow(clippy::result_large_err)]

pub mod dispatch;
pub mod engine;
pub mod foundation;
pub mod inspect;
#[cfg(feature = "json")]
pub mod json;
mod macros;
pub mod prelude;
pub mod schema;
pub mod validators;
pub mod value;

pub use engine::{ValidationOutcome, collect, collect_with, validate, validate_with};
