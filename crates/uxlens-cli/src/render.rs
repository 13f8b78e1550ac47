//! Plain-text rendering of audit reports and history lines.

use uxlens_store::SessionRecord;
use uxlens_types::{AuditItem, AuditReport};

/// Render a full report as readable plain text.
pub fn render_report(report: &AuditReport) -> String {
    let mut out = String::new();

    if let Some(perspective) = &report.perspective {
        out.push_str(perspective);
        out.push_str("\n\n");
    }

    render_section(&mut out, "Critical issues", &report.critical_issues);
    render_section(&mut out, "Suggestions", &report.improvement_suggestions);
    render_section(&mut out, "What works", &report.positive_elements);

    if report.item_count() == 0 {
        out.push_str("No findings.\n");
    }

    out
}

fn render_section(out: &mut String, heading: &str, items: &[AuditItem]) {
    if items.is_empty() {
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for item in items {
        out.push_str("  - ");
        out.push_str(&item.title);
        out.push('\n');
        if !item.description.is_empty() {
            for line in item.description.lines() {
                out.push_str("      ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out.push('\n');
}

/// One-line summary for history listings.
pub fn render_history_line(record: &SessionRecord) -> String {
    format!(
        "  {} {:>8}  {:<16}  {}",
        record.short_id(),
        record.age(),
        record.category.as_str(),
        record.preview()
    )
}
