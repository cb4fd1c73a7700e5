use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
pub const API_KEY_ENV: &str = "CLOCKIFY_API_KEY";

const DEFAULT_BASE_ENDPOINT: &str = "https://api.clockify.me/api/v1";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("please create the config file [{}]", path.display())]
    NotFound { path: PathBuf },
    #[error("unable to read config file [{}]: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("missing configuration value '{field}'")]
    Missing { field: &'static str },
    #[error("invalid configuration value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clockify: ClockifyConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClockifyConfig {
    pub api_key: String,
    pub url_base_endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for ClockifyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            url_base_endpoint: DEFAULT_BASE_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub name: String,
}

impl Config {
    /// Reads the file and applies `CLOCKIFY_API_KEY`. Call [`Config::validate`]
    /// once command line overrides are in place.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Ok(Self::from_toml(&contents)?.with_api_key_override(env::var(API_KEY_ENV).ok()))
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_api_key_override(mut self, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
            self.clockify.api_key = value.trim().to_string();
        }
        self
    }

    pub fn with_workspace_override(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.workspace.name = name;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clockify.api_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "clockify.apiKey",
            });
        }
        if self.clockify.url_base_endpoint.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "clockify.urlBaseEndpoint",
            });
        }
        if self.workspace.name.trim().is_empty() {
            return Err(ConfigError::Missing {
                field: "workspace.name",
            });
        }
        if self.clockify.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "clockify.timeoutSeconds",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.clockify.timeout_seconds)
    }
}
