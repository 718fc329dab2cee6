//! RestForm configuration, read from the `[rest]` table of simpleform.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Endpoint and user-facing texts for a REST-backed form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// POST target for the form values
    pub endpoint: Url,

    /// Shown with a spinner while the request is in flight
    #[serde(default = "default_wait_text")]
    pub wait_text: String,

    /// Heading above a failure message
    #[serde(default = "default_error_text")]
    pub error_text: String,

    /// Fallback success message for handlers that do not produce one
    #[serde(default = "default_success_text")]
    pub success_text: String,

    #[serde(default)]
    pub welcome_text: Option<String>,

    /// Label of the button that leaves the status view
    #[serde(default = "default_back_text")]
    pub back_text: String,

    /// Element id the page scrolls to once a submit starts
    #[serde(default = "default_scroll_origin")]
    pub scroll_origin: String,

    #[serde(default = "default_scroll_delay_ms")]
    pub scroll_delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_wait_text() -> String {
    "Please wait...".to_string()
}

fn default_error_text() -> String {
    "Something went wrong".to_string()
}

fn default_success_text() -> String {
    "Thank you!".to_string()
}

fn default_back_text() -> String {
    "Go back to the form".to_string()
}

fn default_scroll_origin() -> String {
    "content".to_string()
}

fn default_scroll_delay_ms() -> u64 {
    200
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    rest: Option<RestConfig>,
}

impl RestConfig {
    /// Config with default texts for `endpoint`
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            wait_text: default_wait_text(),
            error_text: default_error_text(),
            success_text: default_success_text(),
            welcome_text: None,
            back_text: default_back_text(),
            scroll_origin: default_scroll_origin(),
            scroll_delay_ms: default_scroll_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Read the `[rest]` table of a TOML file. Unlike the form texts, the
    /// endpoint has no default, so the table must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load_optional(path)?
            .ok_or_else(|| anyhow::anyhow!("{:?} has no [rest] section", path))
    }

    /// Like [`RestConfig::load`], but a missing file or table is `None`.
    /// A `[rest]` table that does not parse is still an error.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(file.rest)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RestConfig::new("http://localhost/submit".parse().unwrap());
        assert_eq!(config.scroll_origin, "content");
        assert_eq!(config.scroll_delay(), Duration::from_millis(200));
        assert_eq!(config.back_text, "Go back to the form");
    }

    #[test]
    fn test_rest_table() {
        let toml = r#"
            [texts]
            submit = "Send"

            [rest]
            endpoint = "https://api.example.com/contact"
            wait_text = "Sending..."
            timeout_secs = 5
        "#;
        let file: ConfigFile = toml::from_str(toml).unwrap();
        let rest = file.rest.unwrap();
        assert_eq!(rest.endpoint.as_str(), "https://api.example.com/contact");
        assert_eq!(rest.wait_text, "Sending...");
        assert_eq!(rest.error_text, "Something went wrong");
        assert_eq!(rest.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simpleform.toml");
        assert!(RestConfig::load_optional(&path).unwrap().is_none());

        std::fs::write(&path, "[texts]\nsubmit = \"Send\"\n").unwrap();
        assert!(RestConfig::load_optional(&path).unwrap().is_none());
        assert!(RestConfig::load(&path).is_err());

        std::fs::write(&path, "[rest]\nendpoint = \"https://x.example/\"\ntimeout_secs = \"ten\"\n").unwrap();
        assert!(RestConfig::load_optional(&path).is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let toml = r#"
            [rest]
            endpoint = "not a url"
        "#;
        assert!(toml::from_str::<ConfigFile>(toml).is_err());
    }
}
