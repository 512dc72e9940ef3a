//! String content validators
//!
//! Validators for email addresses and URLs.

use std::sync::LazyLock;

use crate::foundation::ValidationError;

static EMAIL_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").unwrap());

static URL_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(https?|ftp)://[^\s/$.?#].[^\s]*$").unwrap());

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates the `local@domain` shape of an email address.
    ///
    /// The local part is one or more of letters, digits and `+_.-`; the domain
    /// is at least one character. No dot is required in the domain.
    pub Email for str;
    rule(input) { EMAIL_REGEX.is_match(input) }
    error(input) { ValidationError::invalid_format("email") }
    fn email();
}

// ============================================================================
// URL VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates an `http`, `https` or `ftp` URL.
    ///
    /// The host must start with a non-whitespace character other than
    /// `/`, `$`, `.`, `?` or `#`, and be followed by at least one more
    /// non-whitespace character.
    pub Url for str;
    rule(input) { URL_REGEX.is_match(input) }
    error(input) { ValidationError::invalid_format("url") }
    fn url();
}

// ============================================================================
// TESTS
// ============================================================================
