use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::auth::TokenOptions;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV_VAR: &str = "FUNDRAFFLE_API_URL";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub api: ApiConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Fundraising API and identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are resolved against.
    pub base_url: String,
    /// Audience requested for access tokens.
    pub audience: String,
    /// Scope requested for access tokens.
    pub scope: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub endpoints: EndpointPaths,
}

/// Endpoint paths, relative to [`ApiConfig::base_url`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointPaths {
    pub create_fundraising: String,
    pub buy_tickets: String,
    pub upsert_user: String,
    pub list_fundraisings: String,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/".to_string(),
            audience: "http://localhost:8000".to_string(),
            scope: "openid profile email".to_string(),
            timeout_secs: 30,
            endpoints: EndpointPaths::default(),
        }
    }
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            create_fundraising: "lottery/fundraising/create".to_string(),
            buy_tickets: "lottery/fundraising/buy-ticket".to_string(),
            upsert_user: "user/register".to_string(),
            list_fundraisings: "lottery/fundraising/all".to_string(),
        }
    }
}

impl ApiConfig {
    /// Audience and scope to request access tokens with.
    pub fn token_options(&self) -> TokenOptions {
        TokenOptions {
            audience: Some(self.audience.clone()).filter(|a| !a.is_empty()),
            scope: Some(self.scope.clone()).filter(|s| !s.is_empty()),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/fundraffle/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                log::warn!(
                    "Failed to parse config at {}: {e}; using defaults",
                    config_path.display()
                );
                Self::default()
            }),
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };

        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            log::info!("API base URL overridden by {API_URL_ENV_VAR}");
            config.api.base_url = url;
        }

        config
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("fundraffle"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("fundraffle").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
