//! File system utilities for the export pipeline.

use crate::exporter::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tempfile::TempDir;
use tokio::fs;

/// Creates a fresh directory under the OS temp dir.
///
/// The directory and its contents are removed when the returned guard drops.
pub fn create_temp_dir(prefix: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(&format!("{}-", prefix))
        .tempdir()
        .fs_context("creating temporary directory", &std::env::temp_dir())
}

/// Removes a file, succeeding if it is already gone.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing".to_string(),
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Renames `from` to `to`.
pub async fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to)
        .await
        .fs_context(&format!("renaming {} to", from.display()), to)
}

/// Fails unless `path` exists, is a regular file, and is not empty.
pub async fn ensure_non_empty_file(path: &Path) -> Result<()> {
    let metadata = fs::metadata(path)
        .await
        .fs_context("reading metadata of", path)?;

    if !metadata.is_file() {
        return Err(Error::GenericError(format!("{path:?} is not a file")));
    }
    if metadata.len() == 0 {
        return Err(Error::GenericError(format!("{path:?} is empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_file_is_idempotent() {
        let dir = create_temp_dir("fs-test").unwrap();
        let file = dir.path().join("a.txt");
        tokio::fs::write(&file, b"x").await.unwrap();

        remove_file(&file).await.unwrap();
        remove_file(&file).await.unwrap();
        assert!(!file.exists());
    }

    #[tokio::test]
    async fn ensure_non_empty_file_rejects_empty_and_dirs() {
        let dir = create_temp_dir("fs-test").unwrap();
        let empty = dir.path().join("empty.aab");
        tokio::fs::write(&empty, b"").await.unwrap();

        assert!(ensure_non_empty_file(&empty).await.is_err());
        assert!(ensure_non_empty_file(dir.path()).await.is_err());
        assert!(ensure_non_empty_file(&dir.path().join("missing")).await.is_err());

        let full = dir.path().join("full.aab");
        tokio::fs::write(&full, b"PK").await.unwrap();
        ensure_non_empty_file(&full).await.unwrap();
    }

    #[test]
    fn temp_dir_is_removed_on_drop() {
        let dir = create_temp_dir("fs-test").unwrap();
        let path = dir.path().to_path_buf();
        assert!(path.exists());
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("fs-test-")
        );
        drop(dir);
        assert!(!path.exists());
    }
}
