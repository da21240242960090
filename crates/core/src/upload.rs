//! Validation for track uploads.
//!
//! Runs before the store is touched. Each failure names the offending field
//! so clients can tell which constraint they broke.

use crate::error::CoreError;

/// Maximum identifier length, counted in characters rather than bytes.
pub const MAX_IDENTIFIER_CHARS: usize = 256;

/// Validate that `identifier` has between 1 and [`MAX_IDENTIFIER_CHARS`] characters.
pub fn validate_identifier(identifier: &str) -> Result<(), CoreError> {
    let len = identifier.chars().count();
    if len == 0 || len > MAX_IDENTIFIER_CHARS {
        return Err(CoreError::InvalidField {
            field: "identifier",
            message: format!("Identifier must be between 1 and {MAX_IDENTIFIER_CHARS} characters"),
        });
    }
    Ok(())
}

/// Validate that the raw track content is not empty.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.is_empty() {
        return Err(CoreError::InvalidField {
            field: "content",
            message: "Track content cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Validate a full upload. The identifier is checked first.
pub fn validate_upload(identifier: &str, content: &str) -> Result<(), CoreError> {
    validate_identifier(identifier)?;
    validate_content(content)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_boundary_identifier_lengths() {
        assert!(validate_identifier("a").is_ok());
        assert!(validate_identifier(&"x".repeat(MAX_IDENTIFIER_CHARS)).is_ok());
    }

    #[test]
    fn rejects_empty_identifier() {
        assert_matches!(
            validate_identifier(""),
            Err(CoreError::InvalidField { field: "identifier", .. })
        );
    }

    #[test]
    fn rejects_overlong_identifier() {
        assert!(validate_identifier(&"x".repeat(MAX_IDENTIFIER_CHARS + 1)).is_err());
    }

    #[test]
    fn identifier_length_counts_characters_not_bytes() {
        // 256 two-byte characters: 512 bytes but still within the limit.
        let id = "é".repeat(MAX_IDENTIFIER_CHARS);
        assert!(id.len() > MAX_IDENTIFIER_CHARS);
        assert!(validate_identifier(&id).is_ok());
    }

    #[test]
    fn rejects_empty_content() {
        assert_matches!(
            validate_content(""),
            Err(CoreError::InvalidField { field: "content", .. })
        );
    }

    #[test]
    fn whitespace_content_is_not_empty() {
        assert!(validate_content(" ").is_ok());
    }

    #[test]
    fn upload_reports_identifier_before_content() {
        assert_matches!(
            validate_upload("", ""),
            Err(CoreError::InvalidField { field: "identifier", .. })
        );
        assert_matches!(
            validate_upload("t1", ""),
            Err(CoreError::InvalidField { field: "content", .. })
        );
        assert!(validate_upload("t1", "<gpx/>").is_ok());
    }
}
