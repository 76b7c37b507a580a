//! Configuration loading, validation, and management for docweave.
//!
//! Loads configuration from `~/.docweave/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.docweave/config.toml`.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Placeholder syntax settings
    #[serde(default)]
    pub expander: ExpanderConfig,

    /// Confluence wiki loader credentials
    #[serde(default)]
    pub wiki: WikiConfig,

    /// Settings shared by the network loaders
    #[serde(default)]
    pub loaders: LoadersConfig,
}

/// Placeholder delimiter configuration.
///
/// The delimiter pair is configuration, not law: earlier revisions of the
/// expansion syntax used `[` and `]`. The default is `{`/`}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpanderConfig {
    #[serde(default = "default_open_delim")]
    pub open_delim: char,

    #[serde(default = "default_close_delim")]
    pub close_delim: char,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            open_delim: default_open_delim(),
            close_delim: default_close_delim(),
        }
    }
}

fn default_open_delim() -> char {
    '{'
}
fn default_close_delim() -> char {
    '}'
}

/// Credentials for the Confluence wiki loader.
///
/// All three values must be present for the loader to fetch pages; with no
/// `base_url` the loader never matches a locator.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct WikiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

/// Settings shared by the network loaders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadersConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transcript languages to try, in preference order.
    #[serde(default = "default_transcript_languages")]
    pub transcript_languages: Vec<String>,
}

impl Default for LoadersConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            transcript_languages: default_transcript_languages(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_transcript_languages() -> Vec<String> {
    vec!["ja".into(), "en".into()]
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("expander", &self.expander)
            .field("wiki", &self.wiki)
            .field("loaders", &self.loaders)
            .finish()
    }
}

impl std::fmt::Debug for WikiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WikiConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &redact(&self.api_token))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.docweave/config.toml).
    ///
    /// Also checks environment variables for wiki credentials:
    /// - `CONFLUENCE_WIKI_URL`
    /// - `ATLASSIAN_USER_EMAIL`
    /// - `ATLASSIAN_API_TOKEN`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides (highest priority).
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("CONFLUENCE_WIKI_URL") {
            self.wiki.base_url = Some(url);
        }
        if let Ok(user) = std::env::var("ATLASSIAN_USER_EMAIL") {
            self.wiki.username = Some(user);
        }
        if let Ok(token) = std::env::var("ATLASSIAN_API_TOKEN") {
            self.wiki.api_token = Some(token);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".docweave")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expander.open_delim == self.expander.close_delim {
            return Err(ConfigError::ValidationError(
                "open_delim and close_delim must differ".into(),
            ));
        }

        if self.loaders.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be at least 1".into(),
            ));
        }

        if self.loaders.transcript_languages.is_empty() {
            return Err(ConfigError::ValidationError(
                "transcript_languages must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Whether wiki credentials are complete enough to fetch pages.
    pub fn has_wiki_credentials(&self) -> bool {
        self.wiki.base_url.is_some() && self.wiki.username.is_some() && self.wiki.api_token.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for docweave_core::Error {
    fn from(err: ConfigError) -> Self {
        docweave_core::Error::Config {
            message: err.to_string(),
        }
    }
}
