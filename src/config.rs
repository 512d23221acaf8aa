//! Configuration file parser for ~/.config/newsdash/config.toml.
//!
//! The config file is optional: a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde, though we log a warning when the file
//! contains potential typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::util::{validate_api_base, UrlValidationError};

/// Environment variable overriding the API base URL at runtime and at build
/// time.
pub const API_URL_ENV: &str = "NEWSDASH_API_URL";

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://newsapi-r8fr.onrender.com";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    #[error("Invalid API base URL '{url}': {source}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: UrlValidationError,
    },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the news API. `None` falls through to the environment and
    /// the built-in default.
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds. 0 uses the loader default.
    pub request_timeout_secs: u64,

    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Drop feed results that were superseded by a later navigation instead
    /// of applying whichever response resolves last.
    pub discard_stale_responses: bool,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout_secs: 0,
            theme: "dark".to_string(),
            discard_stale_responses: false,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 5] = [
        "api_base_url",
        "request_timeout_secs",
        "theme",
        "discard_stale_responses",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            path = %path.display(),
            theme = %config.theme,
            api_base_url = ?config.api_base_url,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Resolve the API base URL.
    ///
    /// Precedence: `cli` argument, the `NEWSDASH_API_URL` environment
    /// variable, the config file, the value baked in at build time, then
    /// [`DEFAULT_API_BASE_URL`].
    pub fn api_base_url(&self, cli: Option<&str>) -> Result<Url, ConfigError> {
        let env = std::env::var(API_URL_ENV).ok();
        self.resolve_api_base_url(cli, env.as_deref())
    }

    fn resolve_api_base_url(&self, cli: Option<&str>, env: Option<&str>) -> Result<Url, ConfigError> {
        // Blank sources are skipped, not treated as "use the default"
        let raw = [
            cli,
            env,
            self.api_base_url.as_deref(),
            option_env!("NEWSDASH_API_URL"),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);

        validate_api_base(raw).map_err(|source| ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            source,
        })
    }

    /// Request timeout, or `None` to use the loader default.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

// ============================================================================
// Tests
// ============================================================================
