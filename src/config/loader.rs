//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary after loading)
//! 2. Environment variables
//! 3. `.kibitz.toml` in the working directory
//! 4. `~/.config/kibitz/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub proxy: ProxyConfig,
    pub chat: ChatConfig,
}

/// Direct-call provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::OpenAI,
            model: "gpt-4o".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Review proxy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Base URL of the trusted proxy. `None` means no proxy is
    /// deployed and dispatch goes straight to the direct path.
    pub url: Option<String>,
}

/// Chat behaviour configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Preferred language label for prompts, used when the request
    /// carries no hint. Detection still runs when this is absent.
    pub language: Option<String>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, local config, then applies
    /// environment variable overrides.
    pub fn load(local_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: local config
        if let Some(root) = local_root {
            let local_path = root.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for
    /// non-default values).
    fn merge(&mut self, other: Config) {
        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }

        if other.proxy.url.is_some() {
            self.proxy.url = other.proxy.url;
        }

        if other.chat.language.is_some() {
            self.chat.language = other.chat.language;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.var(crate::constants::ENV_PROVIDER) {
            if let Ok(name) = val.parse::<ProviderName>() {
                self.provider.name = name;
            } else {
                eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    crate::constants::ENV_PROVIDER
                );
            }
        }
        if let Some(val) = env.var(crate::constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Some(val) = env.var(crate::constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }
        if let Some(val) = env.var(crate::constants::ENV_PROXY_URL) {
            self.proxy.url = Some(val);
        }
        if let Some(val) = env.var(crate::constants::ENV_LANGUAGE) {
            self.chat.language = Some(val);
        }

        // Provider-specific API key resolution; empty values never
        // shadow a key configured in a file.
        let api_key = env
            .var_nonempty(crate::constants::ENV_API_KEY)
            .or_else(|| env.var_nonempty(self.provider.name.api_key_env_var()));
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }
    }
}
