//! Secret lookup for the completion and table API keys
//!
//! Providers are consulted in order: the local file store in the data
//! directory first, then environment variables (`BOOKSHELF_<NAME>`).
//! Writes go to the first provider that accepts them.

mod env;
mod error;
mod file;
mod provider;
mod types;

pub use error::SecretError;
pub use types::{RequiredSecrets, Secret, SecretStatus};

use provider::SecretProvider;

use std::sync::Arc;

use anyhow::Result;

use crate::core::config::SecretsConfig;
use crate::core::constants::{REQUIRED_SECRETS, SECRET_COMPLETION_API_KEY, SECRET_TABLE_API_KEY};
use crate::core::storage::AppStorage;

#[derive(Debug, Clone)]
pub struct SecretManager {
    providers: Vec<Arc<dyn SecretProvider>>,
    env_prefix: String,
}

impl SecretManager {
    pub async fn init(storage: &AppStorage, config: &SecretsConfig) -> Result<Self> {
        let file = file::FileProvider::init(storage.data_dir()).await?;
        tracing::debug!(path = %file.path().display(), "Secret manager initialized");

        Ok(Self {
            providers: vec![
                Arc::new(file),
                Arc::new(env::EnvProvider::new(config.env_prefix.clone())),
            ],
            env_prefix: config.env_prefix.clone(),
        })
    }

    /// First provider holding `name`, with the provider's name
    async fn lookup(&self, name: &str) -> Result<Option<(Secret, &'static str)>, SecretError> {
        for provider in &self.providers {
            if let Some(secret) = provider.get(name).await? {
                return Ok(Some((secret, provider.name())));
            }
        }
        Ok(None)
    }

    pub async fn get(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        Ok(self.lookup(name).await?.map(|(secret, _)| secret))
    }

    pub async fn get_value(&self, name: &str) -> Result<Option<String>, SecretError> {
        Ok(self.get(name).await?.map(|s| s.value))
    }

    pub async fn set(&self, name: &str, value: &str) -> Result<&'static str, SecretError> {
        validate_name(name)?;
        let secret = Secret::new(value.trim());
        let provider = self
            .providers
            .iter()
            .find(|p| !p.is_read_only())
            .ok_or(SecretError::NoWritableBackend)?;
        provider.set(name, &secret).await?;
        tracing::debug!(name, backend = provider.name(), "Secret stored");
        Ok(provider.name())
    }

    /// Where each required secret currently resolves from
    pub async fn status(&self) -> Result<Vec<SecretStatus>, SecretError> {
        let mut statuses = Vec::with_capacity(REQUIRED_SECRETS.len());
        for name in REQUIRED_SECRETS {
            let source = self.lookup(name).await?.map(|(_, source)| source);
            statuses.push(SecretStatus {
                name: (*name).to_string(),
                source,
            });
        }
        Ok(statuses)
    }

    /// Resolve both API keys, naming every missing one
    pub async fn require(&self) -> Result<RequiredSecrets, SecretError> {
        let completion = self.get_value(SECRET_COMPLETION_API_KEY).await?;
        let table = self.get_value(SECRET_TABLE_API_KEY).await?;

        match (completion, table) {
            (Some(completion_api_key), Some(table_api_key)) => Ok(RequiredSecrets {
                completion_api_key,
                table_api_key,
            }),
            (completion, table) => {
                let mut missing = Vec::new();
                if completion.is_none() {
                    missing.push(SECRET_COMPLETION_API_KEY.to_string());
                }
                if table.is_none() {
                    missing.push(SECRET_TABLE_API_KEY.to_string());
                }
                Err(SecretError::Missing(missing))
            }
        }
    }

    /// How to provide a secret: the CLI command and the environment variable
    pub fn setup_hint(&self, name: &str) -> String {
        format!(
            "bookshelf secrets set {} <value>  (or export {}{})",
            name,
            self.env_prefix,
            name.to_uppercase()
        )
    }

    #[cfg(test)]
    pub(crate) async fn init_for_test(data_dir: &std::path::Path, env_prefix: &str) -> Self {
        let file = file::FileProvider::init(data_dir).await.unwrap();
        Self {
            providers: vec![
                Arc::new(file),
                Arc::new(env::EnvProvider::new(env_prefix.to_string())),
            ],
            env_prefix: env_prefix.to_string(),
        }
    }
}

fn validate_name(name: &str) -> Result<(), SecretError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(SecretError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_require_reports_every_missing_secret() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SecretManager::init_for_test(dir.path(), "BOOKSHELF_TEST_MISSING_").await;

        let err = manager.require().await.unwrap_err();
        match err {
            SecretError::Missing(names) => {
                assert_eq!(names, vec!["completion_api_key", "table_api_key"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_error_message_names_secrets() {
        let err = SecretError::Missing(vec!["table_api_key".to_string()]);
        assert_eq!(err.to_string(), "Missing required secrets: table_api_key");
    }

    #[tokio::test]
    async fn test_set_then_require() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SecretManager::init_for_test(dir.path(), "BOOKSHELF_TEST_SET_").await;

        assert_eq!(manager.set("completion_api_key", "sk-1").await.unwrap(), "file");
        let err = manager.require().await.unwrap_err();
        assert!(matches!(err, SecretError::Missing(ref n) if n == &["table_api_key"]));

        manager.set("table_api_key", " anon-2 ").await.unwrap();
        let secrets = manager.require().await.unwrap();
        assert_eq!(secrets.completion_api_key, "sk-1");
        assert_eq!(secrets.table_api_key, "anon-2");
    }

    #[tokio::test]
    async fn test_env_fallback_and_status() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SecretManager::init_for_test(dir.path(), "BOOKSHELF_TEST_STATUS_").await;
        // SAFETY: variable name is unique to this test
        unsafe { std::env::set_var("BOOKSHELF_TEST_STATUS_TABLE_API_KEY", "from-env") };

        assert_eq!(
            manager.get_value("table_api_key").await.unwrap().as_deref(),
            Some("from-env")
        );

        let status = manager.status().await.unwrap();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].name, "completion_api_key");
        assert!(!status[0].is_set());
        assert_eq!(status[1].source, Some("environment"));

        // File store wins over the environment
        manager.set("table_api_key", "from-file").await.unwrap();
        assert_eq!(
            manager.get_value("table_api_key").await.unwrap().as_deref(),
            Some("from-file")
        );

        unsafe { std::env::remove_var("BOOKSHELF_TEST_STATUS_TABLE_API_KEY") };
    }

    #[tokio::test]
    async fn test_set_rejects_invalid_names() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SecretManager::init_for_test(dir.path(), "BOOKSHELF_TEST_INVALID_").await;

        for name in ["", "Table_Key", "with space", "a/b"] {
            let err = manager.set(name, "v").await.unwrap_err();
            assert!(matches!(err, SecretError::InvalidName(_)), "{name}");
        }
    }

    #[test]
    fn test_setup_hint() {
        let manager = SecretManager {
            providers: Vec::new(),
            env_prefix: "BOOKSHELF_".to_string(),
        };
        assert_eq!(
            manager.setup_hint("table_api_key"),
            "bookshelf secrets set table_api_key <value>  (or export BOOKSHELF_TABLE_API_KEY)"
        );
    }
}
