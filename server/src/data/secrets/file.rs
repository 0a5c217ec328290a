use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use super::error::SecretError;
use super::provider::SecretProvider;
use super::types::{Secret, SecretVault};
use crate::core::constants::FILE_SECRETS_FILENAME;
use crate::utils::file::atomic_write;

/// Plain JSON secret store in the data directory
#[derive(Debug)]
pub struct FileProvider {
    path: PathBuf,
    vault: RwLock<SecretVault>,
    save_mutex: Mutex<()>,
}

impl FileProvider {
    pub async fn init(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(FILE_SECRETS_FILENAME);
        let vault = Self::load(&path).await?;

        Ok(Self {
            path,
            vault: RwLock::new(vault),
            save_mutex: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(path: &Path) -> Result<SecretVault> {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => match serde_json::from_str::<SecretVault>(&json) {
                Ok(vault) => {
                    tracing::debug!(count = vault.secrets.len(), "Loaded secrets from file");
                    Ok(vault)
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Corrupted secrets file, creating backup and starting fresh"
                    );
                    let backup = format!(
                        "{}.corrupt.{}",
                        path.display(),
                        chrono::Utc::now().timestamp()
                    );
                    if let Err(rename_err) = tokio::fs::rename(path, &backup).await {
                        tracing::warn!(error = %rename_err, "Failed to backup corrupted secrets file");
                    } else {
                        tracing::info!(backup = %backup, "Backed up corrupted secrets file");
                    }
                    Ok(SecretVault::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No existing secrets file");
                Ok(SecretVault::default())
            }
            Err(e) => Err(anyhow::anyhow!("Failed to load secrets file: {}", e)),
        }
    }

    async fn save(&self) -> Result<(), SecretError> {
        let _guard = self.save_mutex.lock().await;
        let json = {
            let vault = self.vault.read().await;
            serde_json::to_string_pretty(&*vault)
                .map_err(|e| SecretError::Serialization(e.to_string()))?
        };
        atomic_write(&self.path, &json).await?;
        restrict_permissions(&self.path).await
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), SecretError> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), SecretError> {
    Ok(())
}

#[async_trait]
impl SecretProvider for FileProvider {
    async fn get(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        let vault = self.vault.read().await;
        Ok(vault.get_secret(name))
    }

    async fn set(&self, name: &str, secret: &Secret) -> Result<(), SecretError> {
        {
            let mut vault = self.vault.write().await;
            vault.set_secret(name, secret);
        }
        self.save().await
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
