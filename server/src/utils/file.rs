//! File utility functions

use std::path::{Path, PathBuf};

/// Expand a path string to an absolute path.
///
/// Handles `~` / `~/path` (home directory), relative paths and bare names
/// (resolved against the current directory). Absolute paths pass through.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}

/// Write a file by writing a sibling temp file and renaming it over the target
pub async fn atomic_write(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, contents).await?;

    // Windows refuses to rename over an existing file
    #[cfg(windows)]
    {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            tokio::fs::remove_file(path).await?;
        }
    }

    tokio::fs::rename(&tmp_path, path).await
}
