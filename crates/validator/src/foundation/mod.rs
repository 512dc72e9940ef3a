//! Core validation types and traits
//!
//! - **Traits**: [`Validate`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`]
//!
//! Every function of the validator library is a [`Validate`] implementor:
//! a pure predicate over one input type that reports *why* it failed. The
//! rule dispatcher later replaces the diagnostic message with the message
//! declared on the rule attachment.
//!
//! ```
//! use sentinel_validator::foundation::Validate;
//! use sentinel_validator::validators::postal_code;
//!
//! assert!(postal_code().validate("518035").is_ok());
//! assert!(postal_code().validate("51803").is_err());
//! ```

pub mod error;
pub mod traits;

pub use error::{ValidationError, ValidationErrors};
pub use traits::Validate;
