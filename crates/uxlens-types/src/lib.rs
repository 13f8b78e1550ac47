//! Shared types and error hierarchy for uxlens.

pub mod auditor;
pub mod category;
pub mod error;
pub mod image;
pub mod report;
pub mod util;

pub use auditor::{AuditRequest, Auditor};
pub use category::{DesignCategory, Language};
pub use error::{AuditError, ConfigError};
pub use image::EncodedImage;
pub use report::{AuditItem, AuditReport};
pub use util::{sniff_mime_type, truncate_str};
