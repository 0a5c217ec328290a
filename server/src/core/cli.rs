use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{
    ENV_COMPLETION_URL, ENV_CONFIG, ENV_HOST, ENV_JSON_MODE, ENV_MODEL, ENV_PORT, ENV_TABLE_NAME,
    ENV_TABLE_URL, ENV_TEMPERATURE,
};
use crate::domain::QuickFilter;

#[derive(Parser)]
#[command(name = "bookshelf")]
#[command(
    version,
    about = "Search a book table with natural-language questions",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Table service base URL (PostgREST / Supabase)
    #[arg(long, global = true, env = ENV_TABLE_URL)]
    pub table_url: Option<String>,

    /// Table holding the books
    #[arg(long, global = true, env = ENV_TABLE_NAME)]
    pub table_name: Option<String>,

    /// OpenAI-compatible completion API base URL
    #[arg(long, global = true, env = ENV_COMPLETION_URL)]
    pub completion_url: Option<String>,

    /// Completion model used to translate questions into filters
    #[arg(long, short = 'm', global = true, env = ENV_MODEL)]
    pub model: Option<String>,

    /// Sampling temperature for the completion model
    #[arg(long, global = true, env = ENV_TEMPERATURE, value_parser = parse_temperature)]
    pub temperature: Option<f32>,

    /// Ask the completion model for a JSON object response
    #[arg(long, global = true, env = ENV_JSON_MODE)]
    pub json_mode: Option<bool>,

    /// API server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// API server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,
}

/// Parse temperature from CLI/env string
fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("Invalid temperature '{}'. Expected a number", s))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(format!(
            "Invalid temperature '{}'. Valid range: 0.0 to 2.0",
            s
        ));
    }
    Ok(value)
}

/// Parse quick filter from CLI string
fn parse_quick_filter(s: &str) -> Result<QuickFilter, String> {
    s.parse()
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Search books with a natural-language query
    Search {
        /// The question, e.g. "books cheaper than 500"
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Run one of the quick filters (expensive, low-stock, cheap)
    Quick {
        #[arg(value_parser = parse_quick_filter)]
        filter: QuickFilter,
    },
    /// Interactive search prompt (default command)
    Shell,
    /// Start the JSON API server
    Serve,
    /// Manage the local secret store
    Secrets {
        #[command(subcommand)]
        command: SecretsCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum SecretsCommands {
    /// Store a secret (completion_api_key, table_api_key)
    Set { name: String, value: String },
    /// Show which required secrets are configured and where
    Status,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub table_url: Option<String>,
    pub table_name: Option<String>,
    pub completion_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub json_mode: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Cli {
    fn into_parts(self) -> (CliConfig, Option<Commands>) {
        let config = CliConfig {
            config: self.config,
            table_url: self.table_url,
            table_name: self.table_name,
            completion_url: self.completion_url,
            model: self.model,
            temperature: self.temperature,
            json_mode: self.json_mode,
            host: self.host,
            port: self.port,
        };
        (config, self.command)
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    Cli::parse().into_parts()
}
