//! Identity document validators: resident ID card numbers and postal codes.

use std::sync::LazyLock;

use crate::foundation::ValidationError;

static ID_CARD_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(?:[0-9]{15}|[0-9]{17}[0-9Xx])$").unwrap());

static POSTAL_CODE_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[0-9]{6}$").unwrap());

// ============================================================================
// ID CARD
// ============================================================================

crate::validator! {
    /// Validates the shape of a resident identity card number.
    ///
    /// Accepts the 15-digit legacy form and the 18-character form: 17 digits
    /// followed by a digit or `X`/`x`. The check digit itself is not verified.
    pub IdCard for str;
    rule(input) { ID_CARD_REGEX.is_match(input) }
    error(input) { ValidationError::invalid_format("id_card") }
    fn id_card();
}

// ============================================================================
// POSTAL CODE
// ============================================================================

crate::validator! {
    /// Validates a six-digit postal code.
    pub PostalCode for str;
    rule(input) { POSTAL_CODE_REGEX.is_match(input) }
    error(input) { ValidationError::invalid_format("postal_code") }
    fn postal_code();
}

// ============================================================================
// TESTS
// ============================================================================
