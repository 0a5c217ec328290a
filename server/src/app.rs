//! Core application

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bookshelf_sdk::OpenAiClient;

use crate::api::ApiServer;
use crate::core::cli::{self, Commands, SecretsCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG, REQUIRED_SECRETS};
use crate::core::storage::AppStorage;
use crate::core::{banner, display, shell};
use crate::data::books::RestTableClient;
use crate::data::secrets::{SecretError, SecretManager};
use crate::domain::{BookSearchService, QuickFilter};

pub struct CoreApp {
    pub config: AppConfig,
    pub search: Arc<BookSearchService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let config = AppConfig::load(&cli_config)?;
        let storage = AppStorage::init().await?;
        let secrets = SecretManager::init(&storage, &config.secrets).await?;

        match command.unwrap_or(Commands::Shell) {
            Commands::Secrets { command } => Self::handle_secrets_command(&secrets, command).await,
            Commands::Search { query } => {
                Self::init(config, &secrets)
                    .await?
                    .search_once(&query.join(" "))
                    .await
            }
            Commands::Quick { filter } => Self::init(config, &secrets).await?.quick_once(filter).await,
            Commands::Shell => {
                let app = Self::init(config, &secrets).await?;
                shell::run(&app.search).await
            }
            Commands::Serve => Self::init(config, &secrets).await?.serve().await,
        }
    }

    /// Resolve API keys and build both clients
    async fn init(config: AppConfig, secrets: &SecretManager) -> Result<Self> {
        let keys = match secrets.require().await {
            Ok(keys) => keys,
            Err(SecretError::Missing(names)) => {
                let hints: Vec<String> = names
                    .iter()
                    .map(|name| format!("  {}", secrets.setup_hint(name)))
                    .collect();
                anyhow::bail!(
                    "Missing required secrets: {}\nSet them with:\n{}",
                    names.join(", "),
                    hints.join("\n")
                );
            }
            Err(e) => return Err(e).context("Failed to read secrets"),
        };

        let completion = OpenAiClient::builder(&config.completion.base_url, keys.completion_api_key)
            .timeout(Duration::from_secs(config.completion.timeout_secs))
            .build()
            .context("Failed to create completion client")?;
        let store = RestTableClient::new(&config.table, &keys.table_api_key)
            .context("Failed to create table client")?;

        let search = Arc::new(BookSearchService::new(
            Arc::new(completion),
            Arc::new(store),
            &config.completion,
        ));
        tracing::debug!(
            table = %config.table.name,
            model = %config.completion.model,
            "Search service initialized"
        );

        Ok(Self { config, search })
    }

    fn init_logging() {
        let default_filter = format!("warn,{0}_server=info,{0}_sdk=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn search_once(&self, query: &str) -> Result<()> {
        let results = self.search.search(query).await?;
        println!("{}", display::render_results(&results));
        Ok(())
    }

    async fn quick_once(&self, filter: QuickFilter) -> Result<()> {
        let results = self.search.quick(filter).await?;
        println!("{}", display::render_results(&results));
        Ok(())
    }

    async fn serve(self) -> Result<()> {
        let server = &self.config.server;
        banner::print_banner(
            &server.host,
            server.port,
            &self.config.table.url,
            &self.config.completion.model,
        );
        ApiServer::new(self.search, self.config.server).start().await
    }

    async fn handle_secrets_command(secrets: &SecretManager, cmd: SecretsCommands) -> Result<()> {
        match cmd {
            SecretsCommands::Set { name, value } => {
                let backend = secrets.set(&name, &value).await?;
                println!("Stored {} in the {} secret store.", name, backend);
                if !REQUIRED_SECRETS.contains(&name.as_str()) {
                    println!(
                        "Note: {} is not one of the secrets Bookshelf reads ({}).",
                        name,
                        REQUIRED_SECRETS.join(", ")
                    );
                }
            }
            SecretsCommands::Status => {
                for status in secrets.status().await? {
                    match status.source {
                        Some(source) => println!("  {:<20} set ({})", status.name, source),
                        None => println!(
                            "  {:<20} missing: {}",
                            status.name,
                            secrets.setup_hint(&status.name)
                        ),
                    }
                }
            }
        }
        Ok(())
    }
}
