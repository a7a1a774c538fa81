//! Configuration
//!
//! `config.toml` sections for the backend, the session, the dashboard and
//! logging. `ECOFINANCE_*` environment variables override the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Identifiers scoping every backend request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Bank-data client identifier sent as `client_id`
    #[serde(default)]
    pub client_id: String,

    /// Chat user identifier; a random one is generated per run when unset
    pub user_id: Option<String>,
}

impl SessionConfig {
    /// Chat user id, generating a fresh one when none is configured
    pub fn resolved_user_id(&self) -> String {
        self.user_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("user-{}", uuid::Uuid::new_v4()))
    }
}

/// Dashboard layout options
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Number of transactions shown on the dashboard page
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,
}

fn default_recent_transactions() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_transactions: default_recent_transactions(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Parse a TOML file. Missing sections fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults with `ECOFINANCE_*` variables applied
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Parse `path`, then let `ECOFINANCE_*` variables win
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path).map(|mut config| {
            config.apply_env_overrides();
            config
        })
    }

    /// Candidate config files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(3);
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("ecofinance").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/ecofinance/config.toml"));
        paths.push(PathBuf::from("./config.toml"));
        paths
    }

    /// First readable file from [`Config::search_paths`], else the environment.
    ///
    /// A file that exists but fails to parse is skipped with a warning.
    pub fn load_default() -> Self {
        let found = Self::search_paths()
            .into_iter()
            .filter(|path| path.is_file())
            .find_map(|path| match Self::load_with_env(&path) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Config loaded");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping config file");
                    None
                }
            });

        found.unwrap_or_else(|| {
            tracing::debug!("No config file found, using defaults");
            Self::from_env()
        })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ECOFINANCE_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("ECOFINANCE_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        if let Ok(client_id) = std::env::var("ECOFINANCE_CLIENT_ID") {
            self.session.client_id = client_id;
        }
        if let Ok(user_id) = std::env::var("ECOFINANCE_USER_ID") {
            self.session.user_id = Some(user_id);
        }

        if let Ok(level) = std::env::var("ECOFINANCE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ECOFINANCE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Failures while reading a config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# EcoFinance Configuration
#
# Environment variables override these settings:
# - ECOFINANCE_API_URL
# - ECOFINANCE_API_TIMEOUT_SECS
# - ECOFINANCE_CLIENT_ID
# - ECOFINANCE_USER_ID
# - ECOFINANCE_LOG_LEVEL
# - ECOFINANCE_LOG_FORMAT

[api]
# Backend base URL
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Bank-data client identifier attached to every request
client_id = ""

# Chat user identifier (random per run when unset)
# user_id = "me"

[dashboard]
# Transactions listed on the dashboard page
recent_transactions = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json
format = "pretty"
"#
    .to_string()
}
