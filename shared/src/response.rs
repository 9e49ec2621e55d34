//! API Response types
//!
//! Standardized API response structures shared by the server and its clients.

use serde::{Deserialize, Serialize};

/// Standard API success code
pub const API_CODE_SUCCESS: &str = "E0000";

/// Unified API response structure
///
/// Error responses follow this format:
/// ```json
/// {
///     "code": "E0004",
///     "message": "Réservation verrouillée.",
///     "errors": { "status": "..." }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (E0000 = success, others = error codes)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Field-level validation errors (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<std::collections::BTreeMap<String, String>>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            data: Some(data),
            errors: None,
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// Attach field-level errors to the response
    pub fn with_errors(
        mut self,
        errors: std::collections::BTreeMap<String, String>,
    ) -> Self {
        self.errors = Some(errors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_omits_absent_fields() {
        let json = serde_json::to_value(ApiResponse::ok(42)).unwrap();
        assert_eq!(json["code"], API_CODE_SUCCESS);
        assert_eq!(json["data"], 42);
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let json = serde_json::to_value(ApiResponse::<()>::error("E0004", "conflict")).unwrap();
        assert_eq!(json["code"], "E0004");
        assert_eq!(json["message"], "conflict");
        assert!(json.get("data").is_none());
    }
}
