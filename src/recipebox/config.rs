use crate::error::{RecipeBoxError, Result};
use crate::source::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";

pub const ENV_HOME: &str = "RECIPEBOX_HOME";
pub const ENV_API_URL: &str = "RECIPEBOX_API_URL";
pub const ENV_IDENTITY_URL: &str = "RECIPEBOX_IDENTITY_URL";
pub const ENV_API_KEY: &str = "RECIPEBOX_API_KEY";

/// Configuration for recipebox, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeBoxConfig {
    /// Base URL of the recipe API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the identity provider
    #[serde(default = "default_identity_base_url")]
    pub identity_base_url: String,

    /// Identity provider API key; sign-in is unavailable without one
    #[serde(default)]
    pub identity_api_key: Option<String>,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Quiet period before a typed search is sent
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Reject non-numeric recipe ids before calling the API
    #[serde(default = "default_true")]
    pub strict_ids: bool,

    /// Refuse recipe and favorites commands while signed out
    #[serde(default)]
    pub require_login: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_identity_base_url() -> String {
    DEFAULT_IDENTITY_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for RecipeBoxConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            identity_base_url: default_identity_base_url(),
            identity_api_key: None,
            request_timeout_ms: default_request_timeout_ms(),
            debounce_ms: default_debounce_ms(),
            strict_ids: true,
            require_login: false,
        }
    }
}

pub const CONFIG_KEYS: [&str; 7] = [
    "api-url",
    "identity-url",
    "api-key",
    "timeout-ms",
    "debounce-ms",
    "strict-ids",
    "require-login",
];

impl RecipeBoxConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RecipeBoxError::Io)?;
        let config: RecipeBoxConfig =
            serde_json::from_str(&content).map_err(RecipeBoxError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RecipeBoxError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RecipeBoxError::Serialization)?;
        fs::write(config_path, content).map_err(RecipeBoxError::Io)?;
        Ok(())
    }

    /// Environment variables win over the file. Never persisted.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Ok(url) = std::env::var(ENV_IDENTITY_URL) {
            self.identity_base_url = url;
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            self.identity_api_key = Some(key);
        }
        self
    }

    /// A zero timeout in a hand-edited file falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        match self.request_timeout_ms {
            0 => Duration::from_millis(default_request_timeout_ms()),
            ms => Duration::from_millis(ms),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api-url" => Some(self.api_base_url.clone()),
            "identity-url" => Some(self.identity_base_url.clone()),
            "api-key" => Some(
                self.identity_api_key
                    .as_ref()
                    .map(|_| "(set)".to_string())
                    .unwrap_or_else(|| "(unset)".to_string()),
            ),
            "timeout-ms" => Some(self.request_timeout_ms.to_string()),
            "debounce-ms" => Some(self.debounce_ms.to_string()),
            "strict-ids" => Some(self.strict_ids.to_string()),
            "require-login" => Some(self.require_login.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "api-url" => self.api_base_url = value.trim_end_matches('/').to_string(),
            "identity-url" => self.identity_base_url = value.trim_end_matches('/').to_string(),
            "api-key" => {
                self.identity_api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "timeout-ms" => {
                self.request_timeout_ms = match parse_millis(key, value)? {
                    0 => return Err(format!("{} must be greater than zero", key)),
                    ms => ms,
                }
            }
            "debounce-ms" => self.debounce_ms = parse_millis(key, value)?,
            "strict-ids" => self.strict_ids = parse_bool(key, value)?,
            "require-login" => self.require_login = parse_bool(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_millis(key: &str, value: &str) -> std::result::Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|_| format!("{} expects a number of milliseconds, got '{}'", key, value))
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("{} expects true or false, got '{}'", key, value)),
    }
}
