//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// News API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Labels for audience rule values
    #[serde(default)]
    pub audience: AudienceCatalog,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if self.api.page_size == 0 {
            return Err(AppError::validation("api.page_size must be > 0"));
        }
        Ok(())
    }
}

/// News API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/api/...` paths are joined onto
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Default listing page size
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Scope of the `subordinates` query parameter
    #[serde(default = "defaults::subordinates")]
    pub subordinates: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_size: defaults::page_size(),
            subordinates: defaults::subordinates(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// A selectable value and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
}

impl OptionEntry {
    fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Known departments, roles and extra-attribute slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudienceCatalog {
    #[serde(default = "defaults::departments")]
    pub departments: Vec<OptionEntry>,

    #[serde(default = "defaults::roles")]
    pub roles: Vec<OptionEntry>,

    #[serde(default = "defaults::extra_fields")]
    pub extra_fields: Vec<OptionEntry>,
}

impl Default for AudienceCatalog {
    fn default() -> Self {
        Self {
            departments: defaults::departments(),
            roles: defaults::roles(),
            extra_fields: defaults::extra_fields(),
        }
    }
}

impl AudienceCatalog {
    fn lookup<'a>(options: &'a [OptionEntry], value: &str) -> Option<&'a str> {
        options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }

    pub fn department_label(&self, id: &str) -> Option<&str> {
        Self::lookup(&self.departments, id)
    }

    pub fn role_label(&self, id: &str) -> Option<&str> {
        Self::lookup(&self.roles, id)
    }

    pub fn extra_field_label(&self, id: &str) -> Option<&str> {
        Self::lookup(&self.extra_fields, id)
    }
}

mod defaults {
    use super::OptionEntry;

    // Api defaults
    pub fn base_url() -> String {
        "http://localhost:8000".into()
    }
    pub fn user_agent() -> String {
        "newsdesk/0.1".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn page_size() -> u32 {
        10
    }
    pub fn subordinates() -> String {
        "all".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }

    // Catalog defaults
    pub fn departments() -> Vec<OptionEntry> {
        vec![
            OptionEntry::new("3", "BI"),
            OptionEntry::new("1", "Customer Success"),
            OptionEntry::new("4", "Desarrollo"),
            OptionEntry::new("5", "Insights"),
            OptionEntry::new("2", "Soporte Técnico"),
        ]
    }
    pub fn roles() -> Vec<OptionEntry> {
        vec![
            OptionEntry::new("2", "KAM"),
            OptionEntry::new("3", "Inplant"),
            OptionEntry::new("1", "Gerente"),
            OptionEntry::new("4", "Soporte Técnico"),
            OptionEntry::new("5", "Testing"),
            OptionEntry::new("6", "Promotor"),
            OptionEntry::new("7", "Admin"),
            OptionEntry::new("8", "Desarrollo"),
            OptionEntry::new("9", "Desarrollo2"),
        ]
    }
    pub fn extra_fields() -> Vec<OptionEntry> {
        vec![OptionEntry::new("1", "Zona"), OptionEntry::new("2", "Promotor")]
    }
}
