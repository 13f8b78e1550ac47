//! Auditor trait for AI design-review backends.

use crate::{AuditError, AuditReport, DesignCategory, EncodedImage, Language};
use std::future::Future;
use std::pin::Pin;

/// One audit invocation: the encoded screenshot plus the selectors that
/// shape the critique.
#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub image: EncodedImage,
    pub category: DesignCategory,
    pub language: Language,
}

/// Trait for audit backends (Gemini today, mocks in tests).
///
/// Dyn-compatible so the pipeline works with `Arc<dyn Auditor>`. The
/// returned report always has all three finding lists; a malformed
/// upstream body surfaces as `AuditError::Parse`, never a partial report.
pub trait Auditor: Send + Sync {
    /// Run one audit for the given request.
    fn audit<'a>(
        &'a self,
        request: &'a AuditRequest,
    ) -> Pin<Box<dyn Future<Output = Result<AuditReport, AuditError>> + Send + 'a>>;

    /// Backend name for logging/display (e.g., "gemini").
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn auditor_is_dyn_compatible() {
        fn _accept(_a: &dyn Auditor) {}
    }

    #[test]
    fn arc_auditor_is_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Arc<dyn Auditor>>();
    }
}
