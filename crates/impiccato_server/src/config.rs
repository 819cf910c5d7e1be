//! Server configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use impiccato::Dictionary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Settings for the HTTP game server, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind to.
    #[serde(default = "default_port")]
    port: u16,

    /// Seconds a session may sit idle before it is dropped.
    #[serde(default = "default_session_ttl_secs")]
    session_ttl_secs: u64,

    /// Seconds between sweeps for idle sessions.
    #[serde(default = "default_purge_interval_secs")]
    purge_interval_secs: u64,

    /// Optional TOML file with a `phrases` array replacing the built-in dictionary.
    #[serde(default)]
    dictionary: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_ttl_secs() -> u64 {
    60 * 60
}

fn default_purge_interval_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_ttl_secs: default_session_ttl_secs(),
            purge_interval_secs: default_purge_interval_secs(),
            dictionary: None,
        }
    }
}

/// Contents of a dictionary file.
#[derive(Debug, Deserialize)]
struct DictionaryFile {
    phrases: Vec<String>,
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys take their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies the `PORT` environment variable, if set to a valid port.
    #[instrument(skip(self))]
    pub fn apply_env(&mut self) {
        self.apply_port(std::env::var("PORT").ok().as_deref());
    }

    /// Takes the port from a raw `PORT` value.
    ///
    /// Anything that is not a valid port leaves the configured one in place.
    #[instrument(skip(self))]
    pub fn apply_port(&mut self, raw: Option<&str>) {
        let Some(raw) = raw else {
            return;
        };
        match raw.trim().parse::<u16>() {
            Ok(port) => {
                debug!(port, "Port taken from environment");
                self.port = port;
            }
            Err(e) => warn!(raw, error = %e, port = self.port, "Ignoring invalid PORT"),
        }
    }

    /// Overrides the bind address.
    #[instrument(skip(self))]
    pub fn override_bind(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// Builds the singleplayer dictionary this config points at.
    #[instrument(skip(self))]
    pub fn load_dictionary(&self) -> Result<Dictionary, ConfigError> {
        let Some(path) = &self.dictionary else {
            return Ok(Dictionary::builtin());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read dictionary {}: {}",
                path.display(),
                e
            ))
        })?;
        let file: DictionaryFile = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse dictionary: {}", e)))?;

        let dictionary = Dictionary::new(file.phrases)
            .map_err(|e| ConfigError::new(format!("Unusable dictionary: {}", e)))?;
        info!(count = dictionary.len(), "Custom dictionary loaded");
        Ok(dictionary)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
