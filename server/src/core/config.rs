use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_COMPLETION_TIMEOUT_SECS, DEFAULT_COMPLETION_URL,
    DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TABLE_NAME, DEFAULT_TABLE_TIMEOUT_SECS,
    DEFAULT_TABLE_URL, DEFAULT_TEMPERATURE, SECRETS_DEFAULT_ENV_PREFIX,
};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Table service configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TableFileConfig {
    pub url: Option<String>,
    pub name: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Completion service configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CompletionFileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
    pub json_mode: Option<bool>,
}

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Secrets configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SecretsFileConfig {
    pub env_prefix: Option<String>,
}

/// Root file configuration
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    pub table: Option<TableFileConfig>,
    pub completion: Option<CompletionFileConfig>,
    pub server: Option<ServerFileConfig>,
    pub secrets: Option<SecretsFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if !self.extra.is_empty() {
            let keys_str: String = self
                .extra
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(table) = other.table {
            let current = self.table.get_or_insert_with(TableFileConfig::default);
            if table.url.is_some() {
                tracing::trace!(url = ?table.url, "Merging table.url");
                current.url = table.url;
            }
            if table.name.is_some() {
                current.name = table.name;
            }
            if table.timeout_secs.is_some() {
                current.timeout_secs = table.timeout_secs;
            }
        }

        if let Some(completion) = other.completion {
            let current = self
                .completion
                .get_or_insert_with(CompletionFileConfig::default);
            if completion.base_url.is_some() {
                tracing::trace!(base_url = ?completion.base_url, "Merging completion.base_url");
                current.base_url = completion.base_url;
            }
            if completion.model.is_some() {
                tracing::trace!(model = ?completion.model, "Merging completion.model");
                current.model = completion.model;
            }
            if completion.temperature.is_some() {
                current.temperature = completion.temperature;
            }
            if completion.timeout_secs.is_some() {
                current.timeout_secs = completion.timeout_secs;
            }
            if completion.json_mode.is_some() {
                current.json_mode = completion.json_mode;
            }
        }

        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                current.host = server.host;
            }
            if server.port.is_some() {
                current.port = server.port;
            }
        }

        if let Some(secrets) = other.secrets {
            let current = self.secrets.get_or_insert_with(SecretsFileConfig::default);
            if secrets.env_prefix.is_some() {
                current.env_prefix = secrets.env_prefix;
            }
        }

        self.extra.extend(other.extra);
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// Table service settings
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub url: String,
    pub name: String,
    pub timeout_secs: u64,
}

/// Completion service settings
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub json_mode: bool,
}

/// API server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Secret resolution settings
#[derive(Debug, Clone, PartialEq)]
pub struct SecretsConfig {
    pub env_prefix: String,
}

/// Final application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub table: TableConfig,
    pub completion: CompletionConfig,
    pub server: ServerConfig,
    pub secrets: SecretsConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.bookshelf/bookshelf.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::resolve(file_config, cli);
        config.validate()?;
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn resolve(file_config: FileConfig, cli: &CliConfig) -> Self {
        let file_table = file_config.table.unwrap_or_default();
        let file_completion = file_config.completion.unwrap_or_default();
        let file_server = file_config.server.unwrap_or_default();
        let file_secrets = file_config.secrets.unwrap_or_default();

        let table = TableConfig {
            url: cli
                .table_url
                .clone()
                .or(file_table.url)
                .unwrap_or_else(|| DEFAULT_TABLE_URL.to_string()),
            name: cli
                .table_name
                .clone()
                .or(file_table.name)
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            timeout_secs: file_table
                .timeout_secs
                .unwrap_or(DEFAULT_TABLE_TIMEOUT_SECS),
        };

        let completion = CompletionConfig {
            base_url: cli
                .completion_url
                .clone()
                .or(file_completion.base_url)
                .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string()),
            model: cli
                .model
                .clone()
                .or(file_completion.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: cli
                .temperature
                .or(file_completion.temperature)
                .unwrap_or(DEFAULT_TEMPERATURE),
            timeout_secs: file_completion
                .timeout_secs
                .unwrap_or(DEFAULT_COMPLETION_TIMEOUT_SECS),
            json_mode: cli
                .json_mode
                .or(file_completion.json_mode)
                .unwrap_or(false),
        };

        let server = ServerConfig {
            host: cli
                .host
                .clone()
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        };

        let secrets = SecretsConfig {
            env_prefix: file_secrets
                .env_prefix
                .unwrap_or_else(|| SECRETS_DEFAULT_ENV_PREFIX.to_string()),
        };

        Self {
            table,
            completion,
            server,
            secrets,
        }
    }

    fn validate(&self) -> Result<()> {
        for (label, url) in [
            ("table.url", &self.table.url),
            ("completion.base_url", &self.completion.base_url),
        ] {
            reqwest::Url::parse(url)
                .with_context(|| format!("Invalid {} in configuration: {}", label, url))?;
        }
        if self.table.name.trim().is_empty() {
            anyhow::bail!("Invalid table.name in configuration: must not be empty");
        }
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            anyhow::bail!(
                "Invalid completion.temperature in configuration: {} (valid range 0.0 to 2.0)",
                self.completion.temperature
            );
        }
        Ok(())
    }
}

fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
