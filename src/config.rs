//! Configuration management for geoproxy using the prefer crate.
//!
//! Settings are resolved once at startup from, in order of precedence:
//! environment variables, an explicit `--config` file or an auto-discovered
//! `geoproxy` config file, and built-in defaults. The result is immutable.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mapbox forward/reverse geocoding endpoint.
pub const DEFAULT_API_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places/";

/// Default server bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Default outbound request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;

/// Environment variable holding the provider API key.
pub const ENV_API_KEY: &str = "GEOCODE_API_KEY";
/// Environment variable overriding the provider base URL.
pub const ENV_API_URL: &str = "GEOCODE_API_URL";
/// Environment variable overriding the bind address.
pub const ENV_BIND: &str = "GEOPROXY_BIND";

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No geocoding API key configured (set GEOCODE_API_KEY or geocode.api_key)")]
    MissingApiKey,

    #[error("Invalid geocoding API URL '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Geocoding API URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// Provider credentials and endpoint.
#[derive(Clone, PartialEq)]
pub struct ProviderConfig {
    pub api_key: String,
    /// Base URL the encoded query is appended to.
    pub api_url: String,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Resolved application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderConfig,
    /// Outbound request timeout in seconds.
    pub request_timeout: u64,
    /// User agent for outbound requests.
    pub user_agent: String,
    /// Server bind address (`port`, `host` or `host:port`).
    pub bind: String,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn default_user_agent() -> String {
    format!("geoproxy/{}", env!("CARGO_PKG_VERSION"))
}

/// Geocoding provider section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding provider settings.
    #[serde(default)]
    pub geocode: GeocodeConfig,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Server bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Falls back to defaults when no geoproxy config file is found; a file
    /// that is found but cannot be read or parsed is an error.
    pub async fn load() -> Result<Self, ConfigError> {
        let discovered = match prefer::load("geoproxy").await {
            Ok(pref_config) => pref_config.source_path().map(|p| p.to_path_buf()),
            Err(_) => None,
        };
        Self::load_discovered(discovered.as_deref()).await
    }

    async fn load_discovered(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    /// The format is chosen by file extension: TOML, YAML, or JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(path, &contents)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_err(e.to_string())),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| parse_err(e.to_string())),
            _ => serde_json::from_str(contents).map_err(|e| parse_err(e.to_string())),
        }
    }

    /// Apply environment overrides using the given variable lookup.
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(ENV_API_KEY) {
            tracing::debug!("Using {} from environment", ENV_API_KEY);
            self.geocode.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_API_URL) {
            tracing::debug!("Using {} from environment: {}", ENV_API_URL, url);
            self.geocode.api_url = Some(url);
        }
        if let Some(bind) = lookup(ENV_BIND) {
            tracing::debug!("Using {} from environment: {}", ENV_BIND, bind);
            self.bind = Some(bind);
        }
    }

    /// Resolve into validated settings.
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let api_key = self
            .geocode
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_url = self
            .geocode
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        validate_api_url(&api_url)?;

        Ok(Settings {
            provider: ProviderConfig { api_key, api_url },
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            bind: self.bind.unwrap_or_else(|| DEFAULT_BIND.to_string()),
        })
    }
}

fn validate_api_url(api_url: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(api_url).map_err(|source| ConfigError::InvalidApiUrl {
        url: api_url.to_string(),
        source,
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(ConfigError::UnsupportedScheme(api_url.to_string())),
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load settings with explicit options.
pub async fn load_settings(options: LoadOptions) -> Result<Settings, ConfigError> {
    let mut config = match options.config_path {
        Some(ref path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            Config::load_from_path(Path::new(&expanded)).await?
        }
        None => Config::load().await?,
    };

    if let Some(ref path) = config.source_path {
        tracing::debug!("Loaded config from {}", path.display());
    }

    config.apply_env(|name| std::env::var(name).ok());
    config.into_settings()
}
