//! Filesystem adapter consumed by the command handlers

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Host operations the shell needs. Paths arrive already resolved against
/// the session directory.
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Fails when the directory still has entries.
    async fn remove_empty_dir(&self, path: &Path) -> io::Result<()>;

    /// Fails with `AlreadyExists` when `path` is taken.
    async fn create_file(&self, path: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    async fn write_text(&self, path: &Path, content: &str, mode: WriteMode) -> io::Result<()>;

    /// Entries sorted by name.
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    async fn exists(&self, path: &Path) -> bool;

    async fn is_dir(&self, path: &Path) -> bool;

    async fn is_file(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

#[async_trait]
impl FileSystem for LocalFs {
    async fn create_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir(path).await
    }

    async fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path).await
    }

    async fn create_file(&self, path: &Path) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map(drop)
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn write_text(&self, path: &Path, content: &str, mode: WriteMode) -> io::Result<()> {
        let mut file = match mode {
            WriteMode::Overwrite => {
                fs::OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)
                    .await?
            }
            WriteMode::Append => {
                fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await?
            }
        };
        file.write_all(content.as_bytes()).await?;
        file.flush().await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut reader = fs::read_dir(path).await?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let is_dir = entry.file_type().await.is_ok_and(|ft| ft.is_dir());
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path).await
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }

    async fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_dir())
    }

    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }
}
