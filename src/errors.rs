//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so log lines and API payloads
//! can be grepped and monitored by class.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - API_xxx: HTTP surface errors
//! - BEER_xxx: entity/store errors
//! - CFG_xxx: configuration errors

use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // API Errors
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Resource not found
    ApiNotFound,
    /// Rate limit exceeded
    ApiRateLimited,
    /// Internal server error
    ApiInternalError,

    // ============================================
    // Entity/Store Errors
    // ============================================
    /// No beer with the given id
    BeerNotFound,
    /// Path id is not a well-formed UUID
    BeerInvalidId,
    /// One or more fields failed validation
    ValidationFailed,

    // ============================================
    // Configuration Errors
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,

    // ============================================
    // Generic Errors
    // ============================================
    /// Unknown error
    Unknown,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            // API Errors
            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiNotFound => "API_NOT_FOUND",
            Self::ApiRateLimited => "API_RATE_LIMITED",
            Self::ApiInternalError => "API_INTERNAL_ERROR",

            // Entity/Store Errors
            Self::BeerNotFound => "BEER_NOT_FOUND",
            Self::BeerInvalidId => "BEER_INVALID_ID",
            Self::ValidationFailed => "VALIDATION_FAILED",

            // Configuration Errors
            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",

            // Generic
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::BeerInvalidId | Self::ConfigInvalidValue => 400,
            Self::ApiNotFound | Self::BeerNotFound => 404,
            Self::ValidationFailed => 422,
            Self::ApiRateLimited => 429,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// No beer with the given id
    pub fn beer_not_found(id: impl fmt::Display) -> Self {
        Self::new(ErrorCode::BeerNotFound, format!("No beer with id {}", id))
    }

    /// Malformed id in request path
    pub fn invalid_id(raw: &str) -> Self {
        Self::new(
            ErrorCode::BeerInvalidId,
            format!("Not a valid beer id: {:?}", raw),
        )
    }

    /// Validation failure with per-field messages
    pub fn validation(errors: Vec<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, errors.join(", "))
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// API internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInternalError, msg)
    }

    /// Invalid configuration value
    pub fn config_invalid(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalidValue, msg)
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// Conversion from common error types
// ============================================

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        Self::new(ErrorCode::Unknown, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorCode::Unknown, "IO error", err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(ErrorCode::ApiBadRequest, "JSON parse error", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::beer_not_found("f00");
        assert_eq!(err.code, ErrorCode::BeerNotFound);
        assert_eq!(err.code_str(), "BEER_NOT_FOUND");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::ApiBadRequest.http_status(), 400);
        assert_eq!(ErrorCode::BeerNotFound.http_status(), 404);
        assert_eq!(ErrorCode::ValidationFailed.http_status(), 422);
        assert_eq!(ErrorCode::ApiRateLimited.http_status(), 429);
        assert_eq!(ErrorCode::Unknown.http_status(), 500);
    }

    #[test]
    fn test_validation_joins_messages() {
        let err = AppError::validation(vec![
            "Brand can't be blank".to_string(),
            "Quantity must be non-negative".to_string(),
        ]);
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("Brand can't be blank"));
        assert!(err.message.contains("Quantity must be non-negative"));
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::invalid_id("not-a-uuid");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[BEER_INVALID_ID]"));
        assert!(rendered.contains("not-a-uuid"));
    }
}
