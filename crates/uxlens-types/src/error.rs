//! Error hierarchy for uxlens.

use thiserror::Error;

/// Failures from the audit invocation and the pipeline around it.
///
/// Callers distinguish "retry later" from "retry won't help" via
/// `uxlens_api::is_retryable`; the variants here carry the upstream
/// message verbatim where one exists.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A required request field is missing or malformed before the call
    /// is even made. Retrying without changing the input will not help.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Credential or permission problem upstream (401/403).
    #[error("Authorization failed: {message}")]
    Auth { message: String },

    /// The upstream rejected the request as malformed (400).
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Upstream rate limiting (429). Retryable after backoff.
    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    /// The client-enforced deadline expired, or the upstream gateway
    /// timed out (504).
    #[error("Audit request timed out")]
    Timeout,

    /// Upstream 5xx.
    #[error("Upstream error: {status} {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    /// The upstream answered successfully but with no report text.
    /// Treated as transient.
    #[error("AI response is empty")]
    EmptyResponse,

    /// The response body does not parse as a structured report.
    /// A malformed response is never a partially accepted report.
    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    /// A newer audit was issued while this one was in flight; the
    /// result carries this marker and must be discarded, never shown
    /// or written to the cache.
    #[error("Superseded by a newer audit request")]
    Superseded,
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_error_display_carries_message() {
        let err = AuditError::Auth {
            message: "API key invalid".into(),
        };
        assert_eq!(err.to_string(), "Authorization failed: API key invalid");
    }

    #[test]
    fn rate_limited_display_includes_delay() {
        let err = AuditError::RateLimited {
            retry_after_ms: Some(3000),
        };
        assert!(err.to_string().contains("3000"));
    }

    #[test]
    fn invalid_input_display_carries_message() {
        let err = AuditError::InvalidInput {
            message: "image payload is empty".into(),
        };
        assert_eq!(err.to_string(), "Invalid input: image payload is empty");
    }
}
