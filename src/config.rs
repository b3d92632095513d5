use std::env;
use std::fs;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BiblioError, Result};

/// Environment variable naming an alternative config file path.
const CONFIG_PATH_VAR: &str = "BIBLIO_CONFIG";
/// Environment variable overriding the database password, so the config file
/// can omit the secret entirely.
const PASSWORD_VAR: &str = "BIBLIO_PASSWORD";
/// Default config file, looked up relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "biblio.toml";

/// Connection settings for the library database.
/// Loaded once at startup and injected into the gateway; nothing in the
/// gateway itself reads the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    pub dbname: String,
    /// Upper bound for a single connect or routine call.
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,
}

fn default_port() -> u16 {
    5432
}

fn default_call_timeout_secs() -> u64 {
    30
}

impl DbConfig {
    /// Read the config file (`biblio.toml`, or the path in `BIBLIO_CONFIG`)
    /// and apply the `BIBLIO_PASSWORD` override.
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let text = fs::read_to_string(&path)
            .map_err(|e| BiblioError::Config(format!("cannot read {path}: {e}")))?;
        let mut config = Self::from_toml(&text)?;
        if let Ok(password) = env::var(PASSWORD_VAR) {
            config.password = password;
        }
        Ok(config)
    }

    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| BiblioError::Config(e.to_string()))
    }

    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}
