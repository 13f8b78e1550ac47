//! Design categories (audit lenses) and output languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lens the reviewer applies to a screenshot. Serialized with the
/// upstream wire ids ("UI/UX", "E-commerce", ...), which also appear in
/// the prompt text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesignCategory {
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "E-commerce")]
    Ecommerce,
    #[serde(rename = "Dashboard")]
    Dashboard,
    #[serde(rename = "Game UI")]
    GameUi,
    #[serde(rename = "Marketing Poster")]
    MarketingPoster,
    #[serde(rename = "Artistic")]
    Artistic,
    #[serde(rename = "Branding")]
    Branding,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Video Thumbnail")]
    VideoThumbnail,
    #[serde(rename = "Packaging")]
    Packaging,
    #[serde(rename = "Presentation")]
    Presentation,
}

impl DesignCategory {
    /// All categories, in presentation order.
    pub const ALL: [DesignCategory; 11] = [
        DesignCategory::UiUx,
        DesignCategory::Ecommerce,
        DesignCategory::Dashboard,
        DesignCategory::GameUi,
        DesignCategory::MarketingPoster,
        DesignCategory::Artistic,
        DesignCategory::Branding,
        DesignCategory::SocialMedia,
        DesignCategory::VideoThumbnail,
        DesignCategory::Packaging,
        DesignCategory::Presentation,
    ];

    /// The wire id, as sent in prompts and stored in metadata records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignCategory::UiUx => "UI/UX",
            DesignCategory::Ecommerce => "E-commerce",
            DesignCategory::Dashboard => "Dashboard",
            DesignCategory::GameUi => "Game UI",
            DesignCategory::MarketingPoster => "Marketing Poster",
            DesignCategory::Artistic => "Artistic",
            DesignCategory::Branding => "Branding",
            DesignCategory::SocialMedia => "Social Media",
            DesignCategory::VideoThumbnail => "Video Thumbnail",
            DesignCategory::Packaging => "Packaging",
            DesignCategory::Presentation => "Presentation",
        }
    }
}

impl fmt::Display for DesignCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DesignCategory {
    type Err = String;

    /// Accepts the wire id, case-insensitively, plus a few CLI-friendly
    /// aliases (e.g. "ui", "ecommerce", "game").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        let found = match lower.as_str() {
            "ui/ux" | "ui" | "uiux" => DesignCategory::UiUx,
            "e-commerce" | "ecommerce" => DesignCategory::Ecommerce,
            "dashboard" => DesignCategory::Dashboard,
            "game ui" | "game" => DesignCategory::GameUi,
            "marketing poster" | "poster" => DesignCategory::MarketingPoster,
            "artistic" | "art" => DesignCategory::Artistic,
            "branding" | "logo" => DesignCategory::Branding,
            "social media" | "social" => DesignCategory::SocialMedia,
            "video thumbnail" | "video" => DesignCategory::VideoThumbnail,
            "packaging" => DesignCategory::Packaging,
            "presentation" | "ppt" => DesignCategory::Presentation,
            _ => {
                return Err(format!(
                    "unknown category '{s}' (expected one of: {})",
                    DesignCategory::ALL.map(|c| c.as_str()).join(", ")
                ));
            }
        };
        Ok(found)
    }
}

/// Output language for the report content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
    Ja,
    Ko,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Es => "es",
        }
    }

    /// Human-readable name used in the prompt so the model writes the
    /// report content in the right language.
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Language::Zh => "Simplified Chinese (简体中文)",
            Language::En => "English",
            Language::Ja => "Japanese",
            Language::Ko => "Korean",
            Language::Es => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" => Ok(Language::Zh),
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            "ko" => Ok(Language::Ko),
            "es" => Ok(Language::Es),
            _ => Err(format!("unknown language '{s}' (expected zh, en, ja, ko, es)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_to_wire_id() {
        let json = serde_json::to_string(&DesignCategory::Ecommerce).unwrap();
        assert_eq!(json, "\"E-commerce\"");
    }

    #[test]
    fn category_roundtrips_all_variants() {
        for cat in DesignCategory::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            let back: DesignCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, cat);
        }
    }

    #[test]
    fn category_from_str_accepts_aliases() {
        assert_eq!("ui".parse::<DesignCategory>().unwrap(), DesignCategory::UiUx);
        assert_eq!(
            "Game UI".parse::<DesignCategory>().unwrap(),
            DesignCategory::GameUi
        );
        assert_eq!(
            "poster".parse::<DesignCategory>().unwrap(),
            DesignCategory::MarketingPoster
        );
    }

    #[test]
    fn category_from_str_rejects_unknown() {
        let err = "3d-render".parse::<DesignCategory>().unwrap_err();
        assert!(err.contains("unknown category"));
    }

    #[test]
    fn language_prompt_names() {
        assert_eq!(Language::En.prompt_name(), "English");
        assert!(Language::Zh.prompt_name().contains("Chinese"));
    }

    #[test]
    fn language_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Ja).unwrap(), "\"ja\"");
        let back: Language = serde_json::from_str("\"ko\"").unwrap();
        assert_eq!(back, Language::Ko);
    }
}
