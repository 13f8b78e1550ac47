//! The audit pipeline: encode, request, assemble a session.

use crate::image::{encode_file, make_thumbnail};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use uxlens_store::AuditSession;
use uxlens_types::{AuditError, AuditRequest, Auditor, DesignCategory, Language};

/// Default wall-clock budget for one audit run, encoding included.
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(150);

/// Events emitted by the pipeline during execution.
#[derive(Debug)]
pub enum PipelineEvent {
    /// The image file is being read and encoded.
    Encoding { path: PathBuf },
    /// The request is in flight to the auditor.
    Auditing { auditor: String },
    /// The audit finished and a session was assembled.
    Done,
}

/// Drives a single audit from an image file to a completed
/// [`AuditSession`].
///
/// Each run takes a generation token; starting a new run invalidates
/// every run still in flight. A superseded run resolves to
/// [`AuditError::Superseded`] and produces no session, so the caller
/// never records a result the user has already replaced.
pub struct AuditPipeline {
    auditor: Arc<dyn Auditor>,
    timeout: Duration,
    generation: AtomicU64,
}

impl AuditPipeline {
    pub fn new(auditor: Arc<dyn Auditor>) -> Self {
        Self {
            auditor,
            timeout: DEFAULT_RUN_TIMEOUT,
            generation: AtomicU64::new(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run one audit: encode the file, build the thumbnail, send the
    /// request, and assemble the session. The callback receives
    /// [`PipelineEvent`]s as phases begin (for progress UI).
    ///
    /// The returned session has not been stored; persisting it is the
    /// caller's decision.
    pub async fn run<F>(
        &self,
        path: &Path,
        category: DesignCategory,
        language: Language,
        mut on_event: F,
    ) -> Result<AuditSession, AuditError>
    where
        F: FnMut(PipelineEvent),
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        on_event(PipelineEvent::Encoding {
            path: path.to_path_buf(),
        });

        // Decode/re-encode is CPU-bound; keep it off the runtime threads.
        let owned_path = path.to_path_buf();
        let (image, thumbnail) = tokio::task::spawn_blocking(move || {
            let image = encode_file(&owned_path)?;
            let thumbnail = make_thumbnail(&image)?;
            Ok::<_, AuditError>((image, thumbnail))
        })
        .await
        .map_err(|e| AuditError::InvalidInput {
            message: format!("Encoding task failed: {e}"),
        })??;

        on_event(PipelineEvent::Auditing {
            auditor: self.auditor.name().to_string(),
        });

        let request = AuditRequest {
            image: image.clone(),
            category,
            language,
        };
        let report = tokio::time::timeout(self.timeout, self.auditor.audit(&request))
            .await
            .map_err(|_| AuditError::Timeout)??;

        // Staleness is checked at resolution: a run that lost the race
        // must not surface its result even if the network won.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Audit generation {generation} superseded, dropping result");
            return Err(AuditError::Superseded);
        }

        on_event(PipelineEvent::Done);
        Ok(AuditSession::new(category, report, thumbnail, Some(image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use uxlens_types::AuditReport;

    struct InstantAuditor;

    impl Auditor for InstantAuditor {
        fn audit<'a>(
            &'a self,
            _request: &'a AuditRequest,
        ) -> Pin<Box<dyn Future<Output = Result<AuditReport, AuditError>> + Send + 'a>> {
            Box::pin(async {
                Ok(AuditReport {
                    perspective: None,
                    critical_issues: vec![],
                    improvement_suggestions: vec![],
                    positive_elements: vec![],
                })
            })
        }

        fn name(&self) -> &str {
            "instant"
        }
    }

    fn write_test_png(dir: &tempfile::TempDir) -> PathBuf {
        let img = image::RgbImage::from_pixel(8, 8, image::Rgb([0, 0, 0]));
        let path = dir.path().join("shot.png");
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn run_emits_phases_in_order() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_test_png(&tmp);
        let pipeline = AuditPipeline::new(Arc::new(InstantAuditor));

        let mut phases = Vec::new();
        let session = pipeline
            .run(&path, DesignCategory::UiUx, Language::En, |e| {
                phases.push(format!("{e:?}"));
            })
            .await
            .unwrap();

        assert_eq!(phases.len(), 3);
        assert!(phases[0].starts_with("Encoding"));
        assert!(phases[1].starts_with("Auditing"));
        assert_eq!(phases[2], "Done");
        assert!(session.full_image.is_some());
        assert_eq!(session.thumbnail.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn unreadable_file_is_invalid_input() {
        let tmp = tempfile::TempDir::new().unwrap();
        let pipeline = AuditPipeline::new(Arc::new(InstantAuditor));

        let err = pipeline
            .run(
                &tmp.path().join("missing.png"),
                DesignCategory::UiUx,
                Language::En,
                |_| {},
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn slow_auditor_times_out() {
        struct NeverAuditor;
        impl Auditor for NeverAuditor {
            fn audit<'a>(
                &'a self,
                _request: &'a AuditRequest,
            ) -> Pin<Box<dyn Future<Output = Result<AuditReport, AuditError>> + Send + 'a>>
            {
                Box::pin(async {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    unreachable!()
                })
            }
            fn name(&self) -> &str {
                "never"
            }
        }

        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_test_png(&tmp);
        let pipeline = AuditPipeline::new(Arc::new(NeverAuditor))
            .with_timeout(Duration::from_millis(50));

        let err = pipeline
            .run(&path, DesignCategory::UiUx, Language::En, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, AuditError::Timeout));
    }
}
