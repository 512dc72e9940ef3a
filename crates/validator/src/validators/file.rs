//! Uploaded file constraints: size cap and MIME type allow-list.

use serde::{Deserialize, Serialize};

use crate::foundation::{Validate, ValidationError};
use crate::value::FileData;

// ============================================================================
// FILE CONSTRAINT
// ============================================================================

/// Validates a [`FileData`] bundle against a size cap and a MIME allow-list.
///
/// - missing content always fails
/// - a cap of `None` or `Some(0)` means no size limit; otherwise content
///   longer than `max_size_kb * 1024` bytes fails
/// - an empty allow-list accepts any type; otherwise the MIME label must
///   match one entry ignoring ASCII case, and a missing label fails
///
/// # Examples
///
/// ```
/// use sentinel_validator::validators::FileConstraint;
/// use sentinel_validator::foundation::Validate;
/// use sentinel_validator::value::FileData;
///
/// let avatar = FileConstraint::new(Some(10), vec!["image/png".into()]);
/// assert!(avatar.is_valid(&FileData::new(vec![0_u8; 1024], "image/png")));
/// assert!(!avatar.is_valid(&FileData::new(vec![0_u8; 1024], "image/jpeg")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConstraint {
    /// Size cap in KiB.
    pub max_size_kb: Option<u64>,
    /// Accepted MIME types.
    pub allowed_types: Vec<String>,
}

impl FileConstraint {
    /// Creates a file constraint.
    #[must_use]
    pub fn new(max_size_kb: Option<u64>, allowed_types: Vec<String>) -> Self {
        Self {
            max_size_kb,
            allowed_types,
        }
    }

    /// The size cap in bytes, if one applies.
    #[must_use]
    pub fn max_bytes(&self) -> Option<u64> {
        self.max_size_kb
            .filter(|&kb| kb > 0)
            .map(|kb| kb.saturating_mul(1024))
    }

    fn type_allowed(&self, mime_type: Option<&str>) -> bool {
        if self.allowed_types.is_empty() {
            return true;
        }
        mime_type.is_some_and(|mime| {
            self.allowed_types
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(mime))
        })
    }
}

impl Validate for FileConstraint {
    type Input = FileData;

    fn validate(&self, input: &FileData) -> Result<(), ValidationError> {
        let Some(content) = input.content() else {
            return Err(ValidationError::new("file_missing", "File content is missing"));
        };

        if let Some(max) = self.max_bytes() {
            let size = content.len() as u64;
            if size > max {
                return Err(ValidationError::new("file_too_large", "File is too large")
                    .with_param("max_bytes", max.to_string())
                    .with_param("actual", size.to_string()));
            }
        }

        if !self.type_allowed(input.mime_type()) {
            return Err(
                ValidationError::new("file_type", "File type is not allowed")
                    .with_param("allowed", self.allowed_types.join(","))
                    .with_param("actual", input.mime_type().unwrap_or("").to_string()),
            );
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn png_only() -> FileConstraint {
        FileConstraint::new(Some(10), vec!["image/png".to_string()])
    }

    #[rstest]
    #[case(1024, "image/png", true)]
    #[case(10 * 1024, "image/png", true)]
    #[case(1024, "IMAGE/PNG", true)]
    #[case(1024, "image/jpeg", false)]
    #[case(20 * 1024, "image/png", false)]
    #[case(10 * 1024 + 1, "image/png", false)]
    fn test_size_and_type(#[case] size: usize, #[case] mime: &str, #[case] valid: bool) {
        let file = FileData::new(vec![0_u8; size], mime);
        assert_eq!(png_only().is_valid(&file), valid, "{size} {mime}");
    }

    #[test]
    fn test_missing_content_fails() {
        let file = FileData::default();
        assert_eq!(png_only().validate(&file).unwrap_err().code, "file_missing");
        assert!(!FileConstraint::default().is_valid(&file));
    }

    #[test]
    fn test_missing_mime_fails_only_with_allow_list() {
        let file = FileData::from_content(vec![1_u8, 2, 3]);
        assert!(!png_only().is_valid(&file));
        assert!(FileConstraint::new(Some(10), Vec::new()).is_valid(&file));
    }

    #[test]
    fn test_zero_cap_means_unbounded() {
        let file = FileData::new(vec![0_u8; 64 * 1024], "text/plain");
        assert!(FileConstraint::new(Some(0), Vec::new()).is_valid(&file));
        assert!(FileConstraint::new(None, Vec::new()).is_valid(&file));
        assert_eq!(FileConstraint::new(Some(u64::MAX), Vec::new()).max_bytes(), Some(u64::MAX));
    }
}
