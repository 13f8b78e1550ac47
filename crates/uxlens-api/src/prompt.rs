//! Prompt and response-schema construction for the audit call.

use serde_json::{Value, json};
use uxlens_types::{DesignCategory, Language};

/// System instruction establishing the reviewer role and the per-category
/// lenses. The category named in the request prompt selects which lens
/// the model applies.
pub(crate) const SYSTEM_INSTRUCTION: &str = "\
You are an expert UI/UX design auditor with deep knowledge across multiple \
design disciplines. You will receive a screenshot and a design category; \
apply that category's specific review lens and taboos.

RULES:
- Provide SPECIFIC, ACTIONABLE feedback with concrete examples from the image.
- Avoid generic statements; focus on the assigned category's perspective.
- Be constructive and professional.
- Output MUST be valid JSON matching the schema.
- All text content MUST be in the requested language.

CATEGORY LENSES:
- UI/UX: hierarchy, affordances, accessibility (contrast, touch targets), consistency.
- E-commerce: conversion flow, CTA clarity, trust signals, product presentation.
- Dashboard: data density, scannability, chart integrity, information architecture.
- Game UI: HUD readability, occlusion, feedback, thematic cohesion.
- Marketing Poster: focal point, message hierarchy, typography, call to action.
- Artistic: composition, color theory, balance, originality.
- Branding: mark distinctiveness, scalability, color system, memorability.
- Social Media: thumb-stopping power, legibility at small sizes, crop safety.
- Video Thumbnail: click appeal, face/text balance, contrast at small sizes.
- Packaging: shelf impact, material/print realism, regulatory text placement.
- Presentation: slide hierarchy, text load, chart clarity, consistency.";

/// Per-request prompt text: names the category and the output language.
pub(crate) fn build_prompt(category: DesignCategory, language: Language) -> String {
    format!(
        "Design Category: [{}].\n\n\
         Analyze the image based on the specific \"Lens\" and taboos for this \
         category as defined in the system instructions.\n\n\
         IMPORTANT: The output JSON content MUST be written in {}.",
        category.as_str(),
        language.prompt_name()
    )
}

/// JSON schema the model's response is constrained to. Mirrors
/// `AuditReport`: three required item lists plus an optional perspective.
pub(crate) fn response_schema() -> Value {
    let item_list = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "description": { "type": "STRING" }
            },
            "required": ["title", "description"]
        }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "audit_perspective": { "type": "STRING" },
            "critical_issues": item_list,
            "improvement_suggestions": item_list,
            "positive_elements": item_list
        },
        "required": ["critical_issues", "improvement_suggestions", "positive_elements"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_category_and_language() {
        let prompt = build_prompt(DesignCategory::Dashboard, Language::Ja);
        assert!(prompt.contains("Design Category: [Dashboard]"));
        assert!(prompt.contains("Japanese"));
    }

    #[test]
    fn schema_requires_all_three_lists() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 3);
        assert!(required.contains(&json!("critical_issues")));
        assert!(schema["properties"]["audit_perspective"].is_object());
    }

    #[test]
    fn schema_items_require_title_and_description() {
        let schema = response_schema();
        let required = schema["properties"]["critical_issues"]["items"]["required"]
            .as_array()
            .unwrap();
        assert_eq!(required, &vec![json!("title"), json!("description")]);
    }
}
