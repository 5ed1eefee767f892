//! Configuration file loading with precedence handling.

use crate::client::DEFAULT_ENDPOINT;
use crate::model::PageSize;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG_PATH: &str = "GIFSCROLL_CONFIG";
/// Environment variable selecting the deployment environment.
pub const ENV_ENVIRONMENT: &str = "GIFSCROLL_ENV";
/// Environment variable supplying the API key directly.
pub const ENV_API_KEY: &str = "GIFSCROLL_API_KEY";
/// Environment variable overriding the search endpoint.
pub const ENV_ENDPOINT: &str = "GIFSCROLL_ENDPOINT";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// No API key is configured for the selected environment.
    #[error(
        "No API key for the {environment} environment: set GIFSCROLL_API_KEY or api_keys.{environment} in the config file"
    )]
    MissingApiKey {
        /// Environment whose key is missing.
        environment: Environment,
    },

    /// A value is present but unusable.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

// ===== Environment =====

/// Deployment environment; selects which API key is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development key.
    #[default]
    #[serde(alias = "dev")]
    Development,
    /// Production key.
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    /// Parse a name as used in config files and environment variables.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ===== ConfigFile =====

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/gifscroll/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Deployment environment ("development" or "production").
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Search endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Results requested per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// API keys per environment.
    #[serde(default)]
    pub api_keys: Option<ApiKeysSection>,
}

/// `[api_keys]` table.
///
/// ```toml
/// [api_keys]
/// development = "dev-key"
/// production = "prod-key"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ApiKeysSection {
    /// Key used in the development environment.
    #[serde(default)]
    pub development: Option<String>,

    /// Key used in the production environment.
    #[serde(default)]
    pub production: Option<String>,
}

impl ApiKeysSection {
    /// Key for `environment`, if configured and non-blank.
    pub fn for_environment(&self, environment: Environment) -> Option<&str> {
        let key = match environment {
            Environment::Development => self.development.as_deref(),
            Environment::Production => self.production.as_deref(),
        };
        key.filter(|key| !key.trim().is_empty())
    }
}

// ===== ResolvedConfig =====

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Search endpoint URL.
    pub endpoint: String,
    /// Results requested per page.
    pub page_size: PageSize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// API key for `environment`, if one was found.
    pub api_key: Option<String>,
}

// Hand-written so the API key never reaches the log file.
impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("environment", &self.environment)
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size.get())
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_file_path", &self.log_file_path)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: PageSize::DEFAULT,
            request_timeout_secs: 10,
            log_file_path: default_log_path(),
            api_key: None,
        }
    }
}

impl ResolvedConfig {
    /// The API key, or an error naming the environment that lacks one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingApiKey` when no key was resolved.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey {
                environment: self.environment,
            })
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gifscroll/gifscroll.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gifscroll").join("gifscroll.log")
    } else {
        PathBuf::from("gifscroll.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/gifscroll/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gifscroll").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GIFSCROLL_CONFIG` environment variable
/// 3. Default path `~/.config/gifscroll/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// The API key is picked from `[api_keys]` for the resolved environment.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a zero page size or a zero
/// request timeout.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let page_size = match config.page_size {
        Some(raw) => PageSize::new(raw).map_err(|e| ConfigError::InvalidValue {
            field: "page_size",
            reason: e.to_string(),
        })?,
        None => defaults.page_size,
    };

    let request_timeout_secs = match config.request_timeout_secs {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be at least 1 second".to_string(),
            })
        }
        Some(secs) => secs,
        None => defaults.request_timeout_secs,
    };

    let environment = config.environment.unwrap_or(defaults.environment);
    let api_key = config
        .api_keys
        .as_ref()
        .and_then(|keys| keys.for_environment(environment))
        .map(str::to_string);

    Ok(ResolvedConfig {
        environment,
        endpoint: config.endpoint.unwrap_or(defaults.endpoint),
        page_size,
        request_timeout_secs,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        api_key,
    })
}

/// Environment variable values relevant to configuration.
///
/// Captured as plain data so the override step stays a pure function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// Value of `GIFSCROLL_ENV`.
    pub environment: Option<String>,
    /// Value of `GIFSCROLL_API_KEY`.
    pub api_key: Option<String>,
    /// Value of `GIFSCROLL_ENDPOINT`.
    pub endpoint: Option<String>,
}

impl EnvOverrides {
    /// Read the overrides from the process environment.
    pub fn from_process_env() -> Self {
        Self {
            environment: std::env::var(ENV_ENVIRONMENT).ok(),
            api_key: std::env::var(ENV_API_KEY).ok(),
            endpoint: std::env::var(ENV_ENDPOINT).ok(),
        }
    }
}

/// Apply environment variable overrides to resolved config.
///
/// `GIFSCROLL_ENV` changes the environment; when it does, the key is
/// re-selected from `api_keys` in the config file. `GIFSCROLL_API_KEY` wins
/// over any file key.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for an unknown environment name.
pub fn apply_env_overrides(
    mut config: ResolvedConfig,
    env: &EnvOverrides,
    config_file: Option<&ConfigFile>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(raw) = &env.environment {
        let environment = Environment::parse(raw).ok_or_else(|| ConfigError::InvalidValue {
            field: ENV_ENVIRONMENT,
            reason: format!("unknown environment {:?}", raw),
        })?;
        config = select_environment(config, environment, config_file);
    }

    if let Some(endpoint) = env.endpoint.as_ref().filter(|e| !e.trim().is_empty()) {
        config.endpoint = endpoint.clone();
    }

    if let Some(key) = env.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key.clone());
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
/// An explicit `--env` re-selects the key from the config file unless
/// `GIFSCROLL_API_KEY` supplied one.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    environment_override: Option<Environment>,
    page_size_override: Option<PageSize>,
    env: &EnvOverrides,
    config_file: Option<&ConfigFile>,
) -> ResolvedConfig {
    if let Some(environment) = environment_override {
        let explicit_key = env.api_key.as_ref().filter(|k| !k.trim().is_empty());
        config = select_environment(config, environment, config_file);
        if let Some(key) = explicit_key {
            config.api_key = Some(key.clone());
        }
    }

    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    config
}

fn select_environment(
    mut config: ResolvedConfig,
    environment: Environment,
    config_file: Option<&ConfigFile>,
) -> ResolvedConfig {
    config.environment = environment;
    config.api_key = config_file
        .and_then(|file| file.api_keys.as_ref())
        .and_then(|keys| keys.for_environment(environment))
        .map(str::to_string);
    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
