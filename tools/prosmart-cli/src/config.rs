//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use prosmart_catalog::facets::PAGE_SIZE;
use prosmart_data::{LoadPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["prosmart.toml", ".prosmart.toml", "prosmart.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Replace the base URL with an override, if one is set.
    ///
    /// Returns whether the override applied.
    pub fn apply_base_url_override(&mut self, value: Option<String>) -> bool {
        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(url) => {
                self.api.base_url = url;
                true
            }
            None => false,
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Abort a load after this many seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Minimum listing loading display, in milliseconds.
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: u64,

    /// Minimum detail loading display, in milliseconds.
    #[serde(default = "default_detail_min_loading_ms")]
    pub detail_min_loading_ms: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_min_loading_ms() -> u64 {
    500
}

fn default_detail_min_loading_ms() -> u64 {
    2000
}

impl ApiConfig {
    /// Load ceiling.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Timing of the listing view.
    pub fn listing_policy(&self) -> LoadPolicy {
        LoadPolicy::new(self.timeout(), Duration::from_millis(self.min_loading_ms))
    }

    /// Timing of the detail view.
    pub fn detail_policy(&self) -> LoadPolicy {
        LoadPolicy::new(
            self.timeout(),
            Duration::from_millis(self.detail_min_loading_ms),
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            min_loading_ms: default_min_loading_ms(),
            detail_min_loading_ms: default_detail_min_loading_ms(),
        }
    }
}

/// Listing display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Products per "load more" page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Generate a default prosmart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# ProSmart catalog configuration

[api]
# Overridden by PROSMART_API_BASE_URL when set.
base_url = "{base_url}"
timeout_secs = 20
min_loading_ms = 500
detail_min_loading_ms = 2000

[display]
page_size = {page_size}
"#,
        base_url = DEFAULT_BASE_URL,
        page_size = PAGE_SIZE
    )
}
