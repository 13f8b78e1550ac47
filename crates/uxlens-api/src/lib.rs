//! Gemini generateContent client for uxlens.

mod client;
mod prompt;
mod retry;
mod wire;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, GeminiClient};
pub use retry::{RetryConfig, is_retryable};
