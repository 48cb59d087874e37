//! Directory walker: enumerate a tree into uploadable file records.
//!
//! Each regular file reachable from the root yields exactly one
//! [`FileRecord`]; every subdirectory is recursed into. Symbolic links and
//! special files (sockets, devices, fifos) are skipped, based on the
//! non-following file type of the directory entry. Enumeration order is
//! unspecified and callers must not rely on it.
//!
//! Storage keys are derived from the path relative to a fixed base directory
//! (the invocation working directory in the CLI), with separators normalized
//! to `/` for the remote key namespace. A file outside the base falls back to
//! a key relative to the walk root.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::debug;

use crate::content_type::content_type_for;

/// One regular file discovered by the walk. Immutable; consumed once by the
/// orchestrator.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Filesystem path the content is read from.
    pub path: PathBuf,
    /// Remote key the content is stored under.
    pub key: String,
    /// MIME type derived from the key's extension.
    pub content_type: &'static str,
}

#[derive(Debug)]
pub struct WalkError {
    pub path: PathBuf,
    pub source: io::Error,
}

impl std::fmt::Display for WalkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to walk {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for WalkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Recursively enumerate every regular file under `root`, keying each record
/// relative to `base`.
pub async fn walk(root: &Path, base: &Path) -> Result<Vec<FileRecord>, WalkError> {
    let mut records = Vec::new();
    walk_dir(root.to_path_buf(), base, root, &mut records).await?;
    Ok(records)
}

// Recursive async walk; boxed because async fns cannot recurse directly.
fn walk_dir<'a>(
    dir: PathBuf,
    base: &'a Path,
    root: &'a Path,
    out: &'a mut Vec<FileRecord>,
) -> Pin<Box<dyn Future<Output = Result<(), WalkError>> + Send + 'a>> {
    Box::pin(async move {
        let io_err = |path: PathBuf| move |source: io::Error| WalkError { path, source };

        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(io_err(dir.clone()))?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err(dir.clone()))? {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(io_err(path.clone()))?;
            if file_type.is_dir() {
                walk_dir(path, base, root, out).await?;
            } else if file_type.is_file() {
                let key = storage_key(&path, base, root);
                let content_type = content_type_for(&key);
                out.push(FileRecord {
                    path,
                    key,
                    content_type,
                });
            } else {
                debug!(path = %path.display(), "Skipping symlink or special file");
            }
        }
        Ok(())
    })
}

/// Key for the remote namespace: path relative to `base` (falling back to
/// `root`), components joined with `/`.
fn storage_key(path: &Path, base: &Path, root: &Path) -> String {
    let relative = path
        .strip_prefix(base)
        .or_else(|_| path.strip_prefix(root))
        .unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn write_file(path: &Path, content: &[u8]) {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.unwrap();
        }
        tokio::fs::write(path, content).await.unwrap();
    }

    #[tokio::test]
    async fn walk_finds_every_regular_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("book");
        write_file(&root.join("index.html"), b"index").await;
        write_file(&root.join("css/style.css"), b"css").await;
        write_file(&root.join("a/b/c/deep.js"), b"js").await;

        let records = walk(&root, dir.path()).await.unwrap();
        let keys: HashSet<_> = records.iter().map(|r| r.key.as_str()).collect();

        assert_eq!(records.len(), 3);
        assert_eq!(keys.len(), 3, "keys must be unique per file");
        assert!(keys.contains("book/index.html"));
        assert!(keys.contains("book/css/style.css"));
        assert!(keys.contains("book/a/b/c/deep.js"));
    }

    #[tokio::test]
    async fn keys_use_forward_slashes_and_carry_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("book");
        write_file(&root.join("img/logo.png"), b"png").await;

        let records = walk(&root, dir.path()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "book/img/logo.png");
        assert!(!records[0].key.contains('\\'));
        assert_eq!(records[0].content_type, "image/png");
    }

    #[tokio::test]
    async fn root_outside_base_falls_back_to_root_relative_keys() {
        let base = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        write_file(&elsewhere.path().join("page.html"), b"x").await;

        let records = walk(elsewhere.path(), base.path()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "page.html");
    }

    #[tokio::test]
    async fn walk_of_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(walk(&missing, dir.path()).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("book");
        write_file(&root.join("real.html"), b"x").await;
        tokio::fs::symlink(root.join("real.html"), root.join("link.html"))
            .await
            .unwrap();

        let records = walk(&root, dir.path()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "book/real.html");
    }
}
