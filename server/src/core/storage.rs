//! Platform-aware data directory
//!
//! | Type | Windows | macOS | Linux |
//! |------|---------|-------|-------|
//! | Data | `%APPDATA%\Bookshelf\` | `~/Library/Application Support/Bookshelf/` | `$XDG_DATA_HOME/bookshelf/` |
//!
//! Only the local secret store lives here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use super::constants::{APP_DOT_FOLDER, APP_NAME, ENV_DATA_DIR};
use crate::utils::file::expand_path;

#[derive(Debug, Clone)]
pub struct AppStorage {
    data_dir: PathBuf,
}

impl AppStorage {
    /// Resolve and create the data directory
    pub async fn init() -> Result<Self> {
        let data_dir = Self::resolve_data_dir();

        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);
        tracing::debug!(data_dir = %data_dir.display(), "Storage initialized");

        Ok(Self { data_dir })
    }

    /// Resolve data directory from env var or platform default
    pub fn resolve_data_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return expand_path(&dir);
        }

        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            return proj_dirs.data_dir().to_path_buf();
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(APP_DOT_FOLDER)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
