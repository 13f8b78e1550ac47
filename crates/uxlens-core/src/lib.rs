//! Core audit pipeline: image preparation and orchestration of a
//! single audit run against an [`uxlens_types::Auditor`].

pub mod image;
pub mod pipeline;

pub use image::{THUMBNAIL_JPEG_QUALITY, THUMBNAIL_MAX_WIDTH, encode_file, make_thumbnail};
pub use pipeline::{AuditPipeline, DEFAULT_RUN_TIMEOUT, PipelineEvent};
