//! # Client Configuration
//!
//! YAML-backed settings for the ledger tracker client. Every section has
//! defaults, so an empty (or missing) file yields a working configuration
//! pointed at a local API.
//!
//! ```yaml
//! api:
//!   base_url: https://ledger.example.com/api/v1
//!   timeout_secs: 15
//! list:
//!   page_size: 50
//! debounce:
//!   search_ms: 500
//!   autocomplete_ms: 300
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Overrides `api.base_url` when set
pub const API_URL_ENV: &str = "LEDGER_API_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub debounce: DebounceConfig,
    pub row_status: RowStatusConfig,
    pub notifications: NotificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    pub page_size: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Primary search inputs
    pub search_ms: u64,
    /// Inline autocomplete lookups
    pub autocomplete_ms: u64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            search_ms: 500,
            autocomplete_ms: 300,
        }
    }
}

impl DebounceConfig {
    pub fn search(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }

    pub fn autocomplete(&self) -> Duration {
        Duration::from_millis(self.autocomplete_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowStatusConfig {
    /// How long the success/removed glyph stays on a row
    pub success_ms: u64,
    /// Fade window before a removed row leaves the rendered list
    pub fade_out_ms: u64,
}

impl Default for RowStatusConfig {
    fn default() -> Self {
        Self {
            success_ms: 1000,
            fade_out_ms: 300,
        }
    }
}

impl RowStatusConfig {
    pub fn success(&self) -> Duration {
        Duration::from_millis(self.success_ms)
    }

    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub toast_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { toast_ms: 4000 }
    }
}

impl NotificationConfig {
    pub fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a YAML document, then apply environment overrides
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: ClientConfig = if yaml.trim().is_empty() {
            ClientConfig::default()
        } else {
            serde_yaml::from_str(yaml).context("Invalid client configuration")?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&yaml)?;
        info!("⚙️ Loaded client config from {}", path.display());
        Ok(config)
    }

    /// Load from a file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("⚙️ No config at {}, using defaults", path.display());
            Self::from_yaml("")
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }
}
