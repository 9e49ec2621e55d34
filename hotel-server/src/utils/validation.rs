//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits are applied
//! at the API boundary. Failures are reported per field through
//! [`AppError::FieldValidation`].

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: client first/last name, user name, room number
pub const MAX_NAME_LEN: usize = 100;

/// Short identifiers: phone, document number, document type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::field_validation(field, "must not be empty"));
    }
    if value.len() > max_len {
        return Err(AppError::field_validation(
            field,
            format!("is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        if v.len() > max_len {
            return Err(AppError::field_validation(
                field,
                format!("is too long ({} chars, max {max_len})", v.len()),
            ));
        }
    }
    Ok(())
}

/// Validate an email address: non-empty, contains `@`, within the limit.
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    if !value.contains('@') {
        return Err(AppError::field_validation(
            field,
            "is not a valid email address",
        ));
    }
    Ok(())
}

/// Validate a non-negative amount (a free room has price 0).
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::field_validation(field, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: AppError) -> String {
        match err {
            AppError::FieldValidation { field, .. } => field,
            other => panic!("expected field validation, got {other:?}"),
        }
    }

    #[test]
    fn required_text_rejects_empty_and_oversized() {
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(101), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("ok", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn failures_name_the_offending_field() {
        let err = validate_required_text("", "firstName", MAX_NAME_LEN).unwrap_err();
        assert_eq!(field_of(err), "firstName");

        let err = validate_email("not-an-email", "email").unwrap_err();
        assert_eq!(field_of(err), "email");
    }

    #[test]
    fn email_requires_at_sign() {
        assert!(validate_email("not-an-email", "email").is_err());
        assert!(validate_email("a@b.fr", "email").is_ok());
    }

    #[test]
    fn non_negative_accepts_zero_and_rejects_negatives() {
        assert!(validate_non_negative(0.0, "price").is_ok());
        assert!(validate_non_negative(80.0, "price").is_ok());
        assert!(validate_non_negative(-1.0, "price").is_err());
        assert!(validate_non_negative(f64::NAN, "price").is_err());
    }
}
