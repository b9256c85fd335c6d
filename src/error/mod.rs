use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Backend gateway errors.
///
/// `Unavailable` is an expected deployment mode (no credential configured),
/// not a fault; callers short-circuit to the rule-based path without logging
/// it as an error. Everything else is a transport-level failure and also
/// triggers the fallback path.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("No backend credential configured")]
    Unavailable,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Empty completion in backend response")]
    EmptyCompletion,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Response normalization errors.
///
/// Any of these means the backend's completion did not conform to the
/// capability's declared schema; the AI path is treated as a total failure.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Response is not valid JSON: {message}")]
    Parse { message: String },

    #[error("Response is not a JSON object")]
    NotAnObject,

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Field {field} has wrong type: expected {expected}")]
    WrongType { field: String, expected: String },
}

/// Result type alias for application errors
pub type EngineResult<T> = Result<T, EngineError>;

/// Result type alias for backend gateway operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Result type alias for response normalization
pub type NormalizeResult<T> = Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");

        let err = EngineError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Unavailable;
        assert_eq!(err.to_string(), "No backend credential configured");

        let err = BackendError::Api {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - unauthorized");

        let err = BackendError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");

        let err = BackendError::EmptyCompletion;
        assert_eq!(err.to_string(), "Empty completion in backend response");
    }

    #[test]
    fn test_normalize_error_display() {
        let err = NormalizeError::Parse {
            message: "expected value at line 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Response is not valid JSON: expected value at line 1"
        );

        let err = NormalizeError::MissingField {
            field: "reframes".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required field: reframes");

        let err = NormalizeError::WrongType {
            field: "confidence".to_string(),
            expected: "number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Field confidence has wrong type: expected number"
        );
    }

    #[test]
    fn test_backend_error_conversion_to_engine_error() {
        let backend_err = BackendError::Timeout { timeout_ms: 1000 };
        let engine_err: EngineError = backend_err.into();
        assert!(matches!(engine_err, EngineError::Backend(_)));
    }

    #[test]
    fn test_normalize_error_conversion_to_engine_error() {
        let norm_err = NormalizeError::NotAnObject;
        let engine_err: EngineError = norm_err.into();
        assert!(matches!(engine_err, EngineError::Normalize(_)));
        assert!(engine_err
            .to_string()
            .contains("Response is not a JSON object"));
    }
}
