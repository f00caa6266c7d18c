//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
#[cfg(feature = "native")]
use std::path::{Path, PathBuf};

/// GraphQL endpoint used when nothing else is configured
pub const DEFAULT_GRAPHQL_URL: &str = "http://127.0.0.1:8000/graphql";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graphql: GraphQLConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GraphQL client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLConfig {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_dev_tools")]
    pub connect_to_dev_tools: bool,
}

fn default_url() -> String {
    DEFAULT_GRAPHQL_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_dev_tools() -> bool {
    true
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout(),
            connect_to_dev_tools: default_dev_tools(),
        }
    }
}

/// Router configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RouterConfig {
    /// Path the app is served under
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "/".to_string()
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
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
    "info".to_string()
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

#[cfg(feature = "native")]
impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, source) = Self::discover();
        source.log();
        config
    }

    /// Load from the first usable default location without logging, so
    /// callers can report the outcome once a subscriber is installed
    pub fn discover() -> (Self, ConfigSource) {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("catalog").join("config.toml")),
            Some(PathBuf::from("/etc/catalog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::discover_in(&config_paths)
    }

    fn discover_in(paths: &[PathBuf]) -> (Self, ConfigSource) {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    let source = ConfigSource::File {
                        path: path.clone(),
                        skipped,
                    };
                    return (config, source);
                }
                Err(e) => skipped.push(e),
            }
        }

        (Self::from_env(), ConfigSource::Defaults { skipped })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // GraphQL overrides
        if let Some(url) = lookup("CATALOG_GRAPHQL_URL") {
            self.graphql.url = url;
        }
        if let Some(timeout) = lookup("CATALOG_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.graphql.timeout_secs = t;
            }
        }

        // Router overrides
        if let Some(base_url) = lookup("CATALOG_BASE_URL") {
            self.router.base_url = base_url;
        }

        // Logging overrides
        if let Some(level) = lookup("CATALOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CATALOG_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where a discovered configuration came from
#[cfg(feature = "native")]
#[derive(Debug)]
pub enum ConfigSource {
    /// Loaded from this file
    File {
        path: PathBuf,
        skipped: Vec<ConfigError>,
    },
    /// No usable file; defaults plus environment overrides
    Defaults { skipped: Vec<ConfigError> },
}

#[cfg(feature = "native")]
impl ConfigSource {
    /// Files that existed but failed to load
    pub fn skipped(&self) -> &[ConfigError] {
        match self {
            ConfigSource::File { skipped, .. } | ConfigSource::Defaults { skipped } => skipped,
        }
    }

    pub fn log(&self) {
        for error in self.skipped() {
            tracing::warn!("Skipped config file: {}", error);
        }
        match self {
            ConfigSource::File { path, .. } => tracing::info!("Loaded config from {:?}", path),
            ConfigSource::Defaults { .. } => {
                tracing::debug!("Using default config with environment overrides")
            }
        }
    }
}

/// Configuration errors
#[cfg(feature = "native")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Catalog Configuration
#
# Environment variables override these settings:
# - CATALOG_GRAPHQL_URL
# - CATALOG_TIMEOUT_SECS
# - CATALOG_BASE_URL
# - CATALOG_LOG_LEVEL
# - CATALOG_LOG_FORMAT

[graphql]
# GraphQL endpoint
url = "http://127.0.0.1:8000/graphql"

# Request timeout in seconds
timeout_secs = 30

# Advertise the client to developer tools
connect_to_dev_tools = true

[router]
# Path the app is served under
base_url = "/"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
