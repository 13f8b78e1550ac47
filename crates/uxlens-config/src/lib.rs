//! TOML configuration for uxlens.
//!
//! Reads configuration from multiple sources with precedence:
//! CLI flags > env vars > config file > defaults

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uxlens_types::{ConfigError, DesignCategory, Language};

/// The default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The default model to use.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// The default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolved configuration for a uxlens invocation.
#[derive(Debug, Clone)]
pub struct UxlensConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub default_category: DesignCategory,
    pub default_language: Language,
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
}

/// Settings that can be read from a TOML config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub audit: AuditSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSettings {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Defaults for audit parameters the CLI can override per run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditSettings {
    pub category: Option<DesignCategory>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    pub data_dir: Option<PathBuf>,
}

/// CLI overrides that take highest precedence.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl UxlensConfig {
    /// Load configuration from all sources, applying precedence rules.
    ///
    /// Precedence (highest to lowest):
    /// 1. CLI flags
    /// 2. Environment variables
    /// 3. Config file (~/.uxlens/config.toml)
    /// 4. Defaults
    pub fn load(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let config_dir = config_dir();
        let settings = load_settings_file(&config_dir.join("config.toml"));

        // Resolve API key: CLI > env > config file
        let api_key = overrides
            .api_key
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or(settings.api.api_key)
            .ok_or_else(|| ConfigError::MissingKey {
                key: "api_key (set GEMINI_API_KEY or add to ~/.uxlens/config.toml)".into(),
            })?;

        let model = overrides
            .model
            .or_else(|| std::env::var("UXLENS_MODEL").ok())
            .or(settings.api.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = std::env::var("UXLENS_BASE_URL")
            .ok()
            .or(settings.api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = overrides
            .timeout_secs
            .or(settings.api.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs".into(),
                message: "must be greater than zero".into(),
            });
        }

        let data_dir = std::env::var("UXLENS_DATA_DIR")
            .ok()
            .map(PathBuf::from)
            .or(settings.storage.data_dir)
            .unwrap_or_else(|| config_dir.join("data"));

        Ok(UxlensConfig {
            api_key,
            model,
            base_url,
            timeout_secs,
            default_category: settings.audit.category.unwrap_or(DesignCategory::UiUx),
            default_language: settings.audit.language.unwrap_or(Language::En),
            data_dir,
            config_dir,
        })
    }
}

/// Get the uxlens config directory path (~/.uxlens/).
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("UXLENS_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".uxlens")
}

/// Load and parse a TOML settings file, returning defaults on any error.
fn load_settings_file(path: &std::path::Path) -> SettingsFile {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Failed to parse {}: {}", path.display(), e);
            SettingsFile::default()
        }),
        Err(_) => SettingsFile::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_empty() {
        let settings = SettingsFile::default();
        assert!(settings.api.api_key.is_none());
        assert!(settings.api.model.is_none());
        assert!(settings.audit.category.is_none());
        assert!(settings.storage.data_dir.is_none());
    }

    #[test]
    fn settings_toml_parse() {
        let toml_str = r#"
[api]
model = "gemini-3-pro-preview"
timeout_secs = 60

[audit]
category = "Dashboard"
language = "ja"

[storage]
data_dir = "/var/lib/uxlens"
"#;
        let settings: SettingsFile = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.api.model.as_deref(), Some("gemini-3-pro-preview"));
        assert_eq!(settings.api.timeout_secs, Some(60));
        assert_eq!(settings.audit.category, Some(DesignCategory::Dashboard));
        assert_eq!(settings.audit.language, Some(Language::Ja));
        assert_eq!(
            settings.storage.data_dir.as_deref(),
            Some(std::path::Path::new("/var/lib/uxlens"))
        );
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let toml_str = r#"
[api]
model = "gemini-3-pro-preview"
"#;
        let settings: SettingsFile = toml::from_str(toml_str).unwrap();
        assert!(settings.audit.category.is_none());
        assert!(settings.storage.data_dir.is_none());
    }

    #[test]
    fn unknown_category_fails_to_parse() {
        let toml_str = r#"
[audit]
category = "Interpretive Dance"
"#;
        assert!(toml::from_str::<SettingsFile>(toml_str).is_err());
    }
}
