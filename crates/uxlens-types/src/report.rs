//! The structured audit report returned by the AI reviewer.

use serde::{Deserialize, Serialize};

/// One finding in an audit report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditItem {
    pub title: String,
    pub description: String,
}

/// A complete design critique: three ordered finding lists plus an
/// optional label naming the lens the reviewer applied.
///
/// Field names match the upstream JSON schema exactly; the report is
/// immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(rename = "audit_perspective", skip_serializing_if = "Option::is_none")]
    pub perspective: Option<String>,
    pub critical_issues: Vec<AuditItem>,
    pub improvement_suggestions: Vec<AuditItem>,
    pub positive_elements: Vec<AuditItem>,
}

impl AuditReport {
    /// Total findings across all three lists.
    pub fn item_count(&self) -> usize {
        self.critical_issues.len()
            + self.improvement_suggestions.len()
            + self.positive_elements.len()
    }

    /// One-line verdict for history listings: the critical-issue count,
    /// or "good" when there are none.
    pub fn headline(&self) -> String {
        match self.critical_issues.len() {
            0 => "good".to_string(),
            1 => "1 issue".to_string(),
            n => format!("{n} issues"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str) -> AuditItem {
        AuditItem {
            title: title.into(),
            description: format!("{title} details"),
        }
    }

    #[test]
    fn deserializes_upstream_shape() {
        let json = r#"{
            "audit_perspective": "UI/UX",
            "critical_issues": [{"title": "Low contrast", "description": "Text fails WCAG AA."}],
            "improvement_suggestions": [],
            "positive_elements": [{"title": "Clear CTA", "description": "Primary action stands out."}]
        }"#;
        let report: AuditReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.perspective.as_deref(), Some("UI/UX"));
        assert_eq!(report.critical_issues.len(), 1);
        assert_eq!(report.critical_issues[0].title, "Low contrast");
        assert_eq!(report.item_count(), 2);
    }

    #[test]
    fn perspective_is_optional() {
        let json = r#"{
            "critical_issues": [],
            "improvement_suggestions": [],
            "positive_elements": []
        }"#;
        let report: AuditReport = serde_json::from_str(json).unwrap();
        assert!(report.perspective.is_none());
        assert_eq!(report.item_count(), 0);
    }

    #[test]
    fn missing_list_is_a_parse_error() {
        // The schema requires all three lists; a response without them is
        // malformed, not partially accepted.
        let json = r#"{"critical_issues": []}"#;
        assert!(serde_json::from_str::<AuditReport>(json).is_err());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let report = AuditReport {
            perspective: Some("Dashboard".into()),
            critical_issues: vec![item("Cluttered header")],
            improvement_suggestions: vec![],
            positive_elements: vec![],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["audit_perspective"], "Dashboard");
        assert!(json.get("perspective").is_none());
    }

    #[test]
    fn headline_counts_critical_issues() {
        let mut report = AuditReport {
            perspective: None,
            critical_issues: vec![],
            improvement_suggestions: vec![item("Spacing")],
            positive_elements: vec![],
        };
        assert_eq!(report.headline(), "good");
        report.critical_issues.push(item("Contrast"));
        assert_eq!(report.headline(), "1 issue");
        report.critical_issues.push(item("Hierarchy"));
        assert_eq!(report.headline(), "2 issues");
    }

    #[test]
    fn roundtrips_through_json() {
        let report = AuditReport {
            perspective: Some("Game UI".into()),
            critical_issues: vec![item("HUD occlusion")],
            improvement_suggestions: vec![item("Font scaling")],
            positive_elements: vec![item("Readable minimap")],
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
