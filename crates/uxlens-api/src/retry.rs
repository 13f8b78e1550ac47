//! Retry with exponential backoff for audit requests.

use rand::Rng;
use uxlens_types::AuditError;

/// Configuration for retry behavior on transient audit errors.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries).
    pub max_retries: u32,
    /// Initial delay in milliseconds before the first retry.
    pub initial_delay_ms: u64,
    /// Maximum delay in milliseconds between retries.
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each attempt.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 1000,
            max_delay_ms: 60_000,
            backoff_factor: 2.0,
        }
    }
}

/// Returns `true` if the error is transient and a retry may succeed.
///
/// Bad input and authorization failures are excluded: retrying those
/// without changing the request or the credentials cannot help. An empty
/// or unparsable response is treated as a transient upstream glitch.
pub fn is_retryable(error: &AuditError) -> bool {
    matches!(
        error,
        AuditError::RateLimited { .. }
            | AuditError::Timeout
            | AuditError::Server { .. }
            | AuditError::Network(_)
            | AuditError::EmptyResponse
            | AuditError::Parse(_)
    )
}

/// Delay in milliseconds before the next retry attempt.
///
/// A server-provided `retry_after_ms` wins (clamped to `max_delay_ms`);
/// otherwise exponential backoff with ±25% jitter.
pub fn calculate_delay(config: &RetryConfig, attempt: u32, retry_after_ms: Option<u64>) -> u64 {
    if let Some(server_delay) = retry_after_ms {
        return server_delay.min(config.max_delay_ms);
    }

    let base = config.initial_delay_ms as f64 * config.backoff_factor.powi(attempt as i32);
    let clamped = base.min(config.max_delay_ms as f64);
    let jittered = clamped * rand::rng().random_range(0.75..=1.25);

    (jittered as u64).min(config.max_delay_ms)
}
