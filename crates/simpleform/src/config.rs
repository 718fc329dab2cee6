// File: src/config.rs
// Purpose: Form texts and timing, loaded from simpleform.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Form configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    #[serde(default)]
    pub texts: FormTexts,

    #[serde(default)]
    pub animation: AnimationConfig,
}

/// User-facing strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormTexts {
    pub submit: String,
    pub required_field: String,
    pub empty_field: String,
    pub dodgy_email: String,
    pub mandatory_fields: String,
    /// Used when a custom validator rejects a value and the field has no error text
    pub invalid_field: String,
    /// Fallback for renderers that cannot run the form
    pub noscript: String,
    pub one_error: String,
    /// `{count}` is replaced by the number of errors
    pub many_errors: String,
}

impl Default for FormTexts {
    fn default() -> Self {
        Self {
            submit: "Submit".to_string(),
            required_field: "Required field".to_string(),
            empty_field: "Empty field".to_string(),
            dodgy_email: "It doesn't look like an email".to_string(),
            mandatory_fields: "Mandatory fields".to_string(),
            invalid_field: "This field is invalid".to_string(),
            noscript: "Please enable javascript in order to use this form.".to_string(),
            one_error: "There is one error in the form".to_string(),
            many_errors: "There are {count} errors in the form".to_string(),
        }
    }
}

impl FormTexts {
    /// Banner text for `count` errors
    pub fn total_errors(&self, count: usize) -> String {
        if count > 1 {
            self.many_errors.replace("{count}", &count.to_string())
        } else {
            self.one_error.clone()
        }
    }
}

/// Animation timing handed to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Field message enter/leave duration
    #[serde(default = "default_message_ms")]
    pub message_ms: u64,

    /// Error banner enter/leave duration
    #[serde(default = "default_banner_ms")]
    pub banner_ms: u64,

    /// Pause between hiding the error banner on submit and showing it again
    #[serde(default = "default_banner_retrigger_ms")]
    pub banner_retrigger_ms: u64,
}

fn default_message_ms() -> u64 {
    1000
}

fn default_banner_ms() -> u64 {
    400
}

fn default_banner_retrigger_ms() -> u64 {
    50
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            message_ms: default_message_ms(),
            banner_ms: default_banner_ms(),
            banner_retrigger_ms: default_banner_retrigger_ms(),
        }
    }
}

impl AnimationConfig {
    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_ms)
    }

    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_ms)
    }

    pub fn banner_retrigger_delay(&self) -> Duration {
        Duration::from_millis(self.banner_retrigger_ms)
    }
}

impl FormConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: FormConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FormConfig::default();
        assert_eq!(config.texts.submit, "Submit");
        assert_eq!(config.texts.required_field, "Required field");
        assert_eq!(config.animation.message_ms, 1000);
        assert_eq!(config.animation.banner_ms, 400);
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<FormConfig>("").unwrap_or_default();
        assert_eq!(config.texts.empty_field, "Empty field");
        assert_eq!(config.animation.banner_retrigger_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_texts() {
        let toml = r#"
            [texts]
            submit = "Send"
            many_errors = "{count} problems"

            [animation]
            banner_ms = 250

            [rest]
            endpoint = "https://example.com/contact"
        "#;
        let config: FormConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.texts.submit, "Send");
        assert_eq!(config.texts.required_field, "Required field");
        assert_eq!(config.animation.banner_ms, 250);
        assert_eq!(config.animation.message_ms, 1000);
        assert_eq!(config.texts.total_errors(3), "3 problems");
    }

    #[test]
    fn test_total_errors_text() {
        let texts = FormTexts::default();
        assert_eq!(texts.total_errors(1), "There is one error in the form");
        assert_eq!(texts.total_errors(4), "There are 4 errors in the form");
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = FormConfig::load("/definitely/not/here/simpleform.toml").unwrap();
        assert_eq!(config.texts.submit, "Submit");
    }
}
