//! Runtime configuration.
//!
//! Loaded from a TOML file (`--config`, or `roster.toml` in the working directory),
//! falling back to built-in defaults when no file exists. The completion credential
//! can also come from `ROSTER_COMPLETION_API_KEY`.

use crate::core::error::RosterError;
use crate::core::schemas;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";
pub const API_KEY_ENV: &str = "ROSTER_COMPLETION_API_KEY";

pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Socket address the web server binds to.
    pub bind: String,
    /// SQLite database file.
    pub database: PathBuf,
    /// Secret used to sign the session cookie.
    pub secret_key: String,
    pub username: String,
    pub password: String,
    /// Sessions expire after this many minutes without a request.
    pub session_idle_minutes: i64,
    pub completion: CompletionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            database: PathBuf::from(schemas::ROSTER_DB_NAME),
            secret_key: "123456".to_string(),
            username: "Equipe2024".to_string(),
            password: "123456".to_string(),
            session_idle_minutes: 120,
            completion: CompletionConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    pub endpoint: String,
    pub model: String,
    /// Blank until configured; the study helper fails while it is blank.
    pub api_key: String,
    /// No timeout when absent.
    pub timeout_secs: Option<u64>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, RosterError> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), RosterError> {
        if self.secret_key.is_empty() {
            return Err(RosterError::ConfigError("secret_key must not be empty".to_string()));
        }
        if self.session_idle_minutes <= 0 {
            return Err(RosterError::ConfigError(format!(
                "session_idle_minutes must be positive, got {}",
                self.session_idle_minutes
            )));
        }
        if self.completion.timeout_secs == Some(0) {
            return Err(RosterError::ConfigError(
                "completion.timeout_secs must be > 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// Replace the completion credential from the environment, if set there.
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.completion.api_key = key.trim().to_string();
            }
        }
    }
}

/// Load configuration from `path`, or from `roster.toml` under `cwd` when no path is
/// given. An explicit path must exist; the implicit file is optional.
pub fn load_config(path: Option<&Path>, cwd: &Path) -> Result<Config, RosterError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| {
                RosterError::ConfigError(format!("cannot read {}: {}", path.display(), e))
            })?;
            Config::from_toml_str(&content)?
        }
        None => {
            let implicit = cwd.join(DEFAULT_CONFIG_FILE);
            if implicit.exists() {
                let content = fs::read_to_string(&implicit)?;
                Config::from_toml_str(&content)?
            } else {
                Config::default()
            }
        }
    };
    config.apply_env();
    Ok(config)
}
