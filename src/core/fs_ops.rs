// src/core/fs_ops.rs
//! File system helpers

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Read a whole file as text. Invalid UTF-8 sequences are replaced, not rejected.
    pub async fn read_text_lossy(path: &Path) -> Result<String> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_text_lossy_replaces_invalid_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, b"Jane \xff Doe").unwrap();

        let text = FsOps::read_text_lossy(&path).await.unwrap();
        assert_eq!(text, "Jane \u{FFFD} Doe");
    }

    #[tokio::test]
    async fn test_read_missing_file_names_path() {
        let err = FsOps::read_text_lossy(Path::new("/nonexistent/resume.txt"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/resume.txt"));
    }

    #[tokio::test]
    async fn test_ensure_dir_exists_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        FsOps::ensure_dir_exists(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
