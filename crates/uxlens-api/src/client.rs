//! Gemini generateContent API client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::HeaderMap;
use uxlens_types::{AuditError, AuditReport, AuditRequest, Auditor};

use crate::prompt::{SYSTEM_INSTRUCTION, build_prompt, response_schema};
use crate::retry::{RetryConfig, calculate_delay, is_retryable};
use crate::wire::{
    Content, ErrorWrapper, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    InlineData, Part,
};

/// Default Gemini REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model for design audits.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Upper bound on one audit call, including retries of a single attempt's
/// network exchange. The pipeline reports `AuditError::Timeout` when it
/// expires; the underlying call is left to finish and is discarded.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    retry_config: RetryConfig,
}

impl GeminiClient {
    /// Create a new client. The per-attempt request timeout is fixed;
    /// the overall audit deadline is enforced by the pipeline.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AuditError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AuditError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            retry_config: RetryConfig::default(),
        })
    }

    /// Override the endpoint root (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the retry configuration for transient errors (429, 5xx, network).
    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    fn build_request(&self, request: &AuditRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: request.image.mime_type.clone(),
                            data: request.image.data.clone(),
                        },
                    },
                    Part::Text {
                        text: build_prompt(request.category, request.language),
                    },
                ],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            }),
        }
    }

    /// Run one audit, retrying transient failures with backoff.
    async fn run_audit(&self, request: &AuditRequest) -> Result<AuditReport, AuditError> {
        if request.image.data.is_empty() {
            return Err(AuditError::InvalidInput {
                message: "image payload is empty".to_string(),
            });
        }
        if request.image.mime_type.is_empty() {
            return Err(AuditError::InvalidInput {
                message: "image MIME type is missing".to_string(),
            });
        }

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = self.build_request(request);

        for attempt in 0..=self.retry_config.max_retries {
            tracing::debug!(
                model = %self.model,
                category = %request.category,
                "generateContent (attempt {}/{})",
                attempt + 1,
                self.retry_config.max_retries + 1
            );

            let err = match self.attempt(&url, &body).await {
                Ok(report) => return Ok(report),
                Err(err) => err,
            };

            if !is_retryable(&err) || attempt == self.retry_config.max_retries {
                return Err(err);
            }

            let retry_after = match &err {
                AuditError::RateLimited { retry_after_ms } => *retry_after_ms,
                _ => None,
            };
            let delay = calculate_delay(&self.retry_config, attempt, retry_after);
            tracing::warn!(
                "Retryable audit error (attempt {}/{}): {err}. Retrying in {delay}ms...",
                attempt + 1,
                self.retry_config.max_retries,
            );
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        // Unreachable: the loop always returns on the last attempt
        unreachable!("retry loop should have returned")
    }

    async fn attempt(
        &self,
        url: &str,
        body: &GenerateContentRequest,
    ) -> Result<AuditReport, AuditError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuditError::Timeout
                } else {
                    AuditError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = parse_retry_after(response.headers());
            let body_text = response.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &body_text, retry_after));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AuditError::Parse(e.to_string()))?;

        let text = parsed.into_text().ok_or(AuditError::EmptyResponse)?;
        if text.trim().is_empty() {
            return Err(AuditError::EmptyResponse);
        }

        parse_report(&text)
    }
}

impl Auditor for GeminiClient {
    fn audit<'a>(
        &'a self,
        request: &'a AuditRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AuditReport, AuditError>> + Send + 'a>> {
        Box::pin(self.run_audit(request))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Parse the model's JSON text into a report. Malformed JSON is a parse
/// failure, never a partially accepted report.
fn parse_report(text: &str) -> Result<AuditReport, AuditError> {
    serde_json::from_str(text).map_err(|e| AuditError::Parse(e.to_string()))
}

/// Parse the `retry-after` header value as seconds, in milliseconds.
fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
}

/// Classify an HTTP error response into a typed AuditError.
fn classify_error(status: u16, body: &str, retry_after: Option<u64>) -> AuditError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|w| w.error)
        .map(|e| {
            let status_text = e.status.unwrap_or_default();
            let msg = e.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|| body.to_string());

    match status {
        400 => AuditError::BadRequest { message },
        401 | 403 => AuditError::Auth { message },
        429 => AuditError::RateLimited {
            retry_after_ms: retry_after,
        },
        504 => AuditError::Timeout,
        500..=599 => AuditError::Server { status, message },
        _ => AuditError::Server { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;
    use uxlens_types::{DesignCategory, EncodedImage, Language};

    fn test_request() -> AuditRequest {
        AuditRequest {
            image: EncodedImage::new("QUJD", "image/png"),
            category: DesignCategory::UiUx,
            language: Language::En,
        }
    }

    #[test]
    fn parse_retry_after_integer_and_float() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("5"));
        assert_eq!(parse_retry_after(&headers), Some(5000));
        headers.insert("retry-after", HeaderValue::from_static("1.5"));
        assert_eq!(parse_retry_after(&headers), Some(1500));
    }

    #[test]
    fn parse_retry_after_missing_or_invalid() {
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("soon"));
        assert_eq!(parse_retry_after(&headers), None);
    }

    #[test]
    fn classify_401_and_403_as_auth() {
        let body = r#"{"error":{"message":"key invalid","status":"PERMISSION_DENIED"}}"#;
        assert!(matches!(
            classify_error(401, body, None),
            AuditError::Auth { .. }
        ));
        match classify_error(403, body, None) {
            AuditError::Auth { message } => {
                assert_eq!(message, "PERMISSION_DENIED: key invalid");
            }
            other => panic!("expected Auth, got {other:?}"),
        }
    }

    #[test]
    fn classify_400_as_bad_request() {
        let err = classify_error(400, r#"{"error":{"message":"bad image"}}"#, None);
        match err {
            AuditError::BadRequest { message } => assert_eq!(message, "bad image"),
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }

    #[test]
    fn classify_429_keeps_retry_after() {
        match classify_error(429, "{}", Some(3000)) {
            AuditError::RateLimited { retry_after_ms } => {
                assert_eq!(retry_after_ms, Some(3000));
            }
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn classify_504_as_timeout() {
        assert!(matches!(
            classify_error(504, "{}", None),
            AuditError::Timeout
        ));
    }

    #[test]
    fn classify_5xx_as_server() {
        match classify_error(503, r#"{"error":{"message":"overloaded"}}"#, None) {
            AuditError::Server { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn classify_unparsable_body_falls_back_to_raw_text() {
        match classify_error(500, "upstream exploded", None) {
            AuditError::Server { message, .. } => assert_eq!(message, "upstream exploded"),
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn parse_report_accepts_valid_json() {
        let text = r#"{
            "audit_perspective": "UI/UX",
            "critical_issues": [],
            "improvement_suggestions": [],
            "positive_elements": []
        }"#;
        let report = parse_report(text).unwrap();
        assert_eq!(report.perspective.as_deref(), Some("UI/UX"));
    }

    #[test]
    fn parse_report_rejects_malformed_json() {
        assert!(matches!(
            parse_report("not json at all"),
            Err(AuditError::Parse(_))
        ));
    }

    #[test]
    fn request_body_carries_image_prompt_and_schema() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL).unwrap();
        let body = client.build_request(&test_request());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "image/png"
        );
        let text = json["contents"][0]["parts"][1]["text"].as_str().unwrap();
        assert!(text.contains("Design Category: [UI/UX]"));
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("design auditor"));
    }

    #[tokio::test]
    async fn empty_image_rejected_before_any_network_call() {
        let client = GeminiClient::new("test-key", DEFAULT_MODEL).unwrap();
        let request = AuditRequest {
            image: EncodedImage::new("", "image/png"),
            category: DesignCategory::UiUx,
            language: Language::En,
        };
        let err = client.run_audit(&request).await.unwrap_err();
        assert!(matches!(err, AuditError::InvalidInput { .. }));
    }

    #[test]
    fn auditor_name_is_gemini() {
        let client = GeminiClient::new("k", DEFAULT_MODEL).unwrap();
        assert_eq!(client.name(), "gemini");
    }
}
