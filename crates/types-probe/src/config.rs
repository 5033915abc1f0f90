use crate::error::{ProbeError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use types_probe_core::{DEFAULT_USER_AGENT, HttpClient, HttpOptions};
use types_probe_npm::NpmRegistry;

/// Environment variable overriding the registry URL.
pub const REGISTRY_ENV: &str = "TYPES_PROBE_REGISTRY";

/// Root configuration for types-probe.
///
/// Loaded from an optional JSON file. All fields use defaults if not specified.
///
/// # Examples
///
/// ```
/// use types_probe::config::ProbeConfig;
///
/// let json = r#"{
///     "registry": { "url": "https://registry.example.com" },
///     "presentation": { "label": "TS: " }
/// }"#;
///
/// let config: ProbeConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.registry.url, "https://registry.example.com");
/// assert_eq!(config.presentation.label, "TS: ");
/// assert_eq!(config.presentation.element_id, "npm-package-support");
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProbeConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl ProbeConfig {
    /// Reads configuration from `path`, or returns defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| ProbeError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = serde_json::from_str(&content).map_err(|e| ProbeError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Replaces the registry URL when `url` is given.
    pub fn with_registry_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            tracing::debug!("registry URL overridden: {}", url);
            self.registry.url = url;
        }
        self
    }
}

/// Registry endpoint and transport settings.
///
/// # Defaults
///
/// - `url`: `"https://registry.npmjs.com"`
/// - `user_agent`: `"types-probe/<version>"`
/// - `timeout_secs`: none (the transport waits indefinitely)
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RegistryConfig {
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Builds a registry client with a fresh packument cache.
    pub fn client(&self) -> Result<NpmRegistry> {
        let http = HttpClient::with_options(&self.http_options())?;
        Ok(NpmRegistry::new(http, &self.url)?)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

/// How the annotation is written into the host page.
///
/// # Defaults
///
/// - `label`: `"TYPE: "`
/// - `label_style`: `"color:green"`
/// - `element_id`: `"npm-package-support"`
/// - `anchor_selector`: `"#top"`
#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    /// Maximum length: 100 characters (truncated with warning if exceeded)
    #[serde(default = "default_label", deserialize_with = "deserialize_label")]
    pub label: String,
    #[serde(default = "default_label_style")]
    pub label_style: String,
    #[serde(default = "default_element_id")]
    pub element_id: String,
    #[serde(default = "default_anchor_selector")]
    pub anchor_selector: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            label_style: default_label_style(),
            element_id: default_element_id(),
            anchor_selector: default_anchor_selector(),
        }
    }
}

fn default_registry_url() -> String {
    types_probe_npm::REGISTRY_BASE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_label() -> String {
    "TYPE: ".to_string()
}

fn default_label_style() -> String {
    "color:green".to_string()
}

fn default_element_id() -> String {
    "npm-package-support".to_string()
}

fn default_anchor_selector() -> String {
    "#top".to_string()
}

const MAX_LABEL_LENGTH: usize = 100;

fn validate_label(label: String) -> String {
    if label.chars().count() > MAX_LABEL_LENGTH {
        tracing::warn!(
            "label exceeded max length of {} chars, truncating",
            MAX_LABEL_LENGTH
        );
        label.chars().take(MAX_LABEL_LENGTH).collect()
    } else {
        label
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let label = String::deserialize(deserializer)?;
    Ok(validate_label(label))
}
