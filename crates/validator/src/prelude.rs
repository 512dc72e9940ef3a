//! Prelude module for convenient imports.
//!
//! ```
//! use sentinel_validator::prelude::*;
//!
//! let schema = Schema::builder("Order")
//!     .field("qty", [RuleAttachment::quantity(1, 100)])
//!     .build();
//! assert_eq!(schema.len(), 1);
//! assert!(in_range(1_i64, 100).is_valid(&80));
//! ```

// ============================================================================
// FOUNDATION
// ============================================================================

pub use crate::foundation::{Validate, ValidationError, ValidationErrors};

// ============================================================================
// DECLARATION AND ENGINE
// ============================================================================

pub use crate::engine::{ValidationOutcome, collect, collect_with, validate, validate_with};
pub use crate::inspect::{FieldSource, Inspect};
pub use crate::schema::{
    DateRangeRule, FieldDescriptor, Rule, RuleAttachment, Schema, SchemaError,
};
pub use crate::value::{AsFieldValue, EnumMembers, FieldValue, FileData};
pub use crate::{field_enum, schema};

// ============================================================================
// VALIDATORS
// ============================================================================

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;
