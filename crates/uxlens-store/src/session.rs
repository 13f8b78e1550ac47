//! Audit session data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use uxlens_types::{AuditReport, DesignCategory, EncodedImage, truncate_str};

/// One completed audit: the unit of history.
///
/// Born exactly once, when an audit succeeds; immutable afterwards. The
/// `id` is the join key between the metadata and blob tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub category: DesignCategory,
    pub report: AuditReport,
    /// Small, low-res image; always present; lives in the metadata tier.
    pub thumbnail: EncodedImage,
    /// Full-resolution image; blob tier only. Absence is a normal state.
    pub full_image: Option<EncodedImage>,
}

impl AuditSession {
    /// Create a session with a fresh id for a just-completed audit.
    pub fn new(
        category: DesignCategory,
        report: AuditReport,
        thumbnail: EncodedImage,
        full_image: Option<EncodedImage>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            category,
            report,
            thumbnail,
            full_image,
        }
    }

    /// Split into the metadata record and the blob payload.
    pub fn into_parts(self) -> (SessionRecord, Option<EncodedImage>) {
        (
            SessionRecord {
                id: self.id,
                created_at: self.created_at,
                category: self.category,
                report: self.report,
                thumbnail: self.thumbnail,
            },
            self.full_image,
        )
    }
}

/// The metadata record: a session minus its full image. The ordered list
/// of these records, newest first, is exactly the visible history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub category: DesignCategory,
    pub report: AuditReport,
    pub thumbnail: EncodedImage,
}

impl SessionRecord {
    /// Prefix of the id for display. Short ids are shown whole.
    pub fn short_id(&self) -> &str {
        truncate_str(&self.id, 8)
    }

    /// Human-readable age string (e.g. "2h ago", "3d ago").
    pub fn age(&self) -> String {
        let minutes = (Utc::now() - self.created_at).num_minutes();
        if minutes < 1 {
            "just now".to_string()
        } else if minutes < 60 {
            format!("{minutes}m ago")
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }

    /// One-line summary for history listings: top critical-issue title,
    /// or the verdict when there are none.
    pub fn preview(&self) -> String {
        match self.report.critical_issues.first() {
            Some(item) => {
                let trimmed = item.title.trim();
                if trimmed.len() > 60 {
                    format!("{}...", truncate_str(trimmed, 57))
                } else {
                    trimmed.to_string()
                }
            }
            None => self.report.headline(),
        }
    }
}
