//! `tokio::fs` counterparts of the blocking helpers in the parent module.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::{EntryInfo, ListedEntry};

pub async fn stat(path: &Path) -> io::Result<EntryInfo> {
    fs::metadata(path).await.map(|m| m.file_type().into())
}

pub async fn stat_no_follow(path: &Path) -> io::Result<EntryInfo> {
    fs::symlink_metadata(path).await.map(|m| m.file_type().into())
}

/// Read the immediate children of `path`; see [`super::list_directory`].
pub async fn list_directory(path: &Path) -> io::Result<Vec<ListedEntry>> {
    let mut dir = fs::read_dir(path).await?;
    let mut entries = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        entries.push(ListedEntry {
            name: entry.file_name(),
            info: entry.file_type().await?.into(),
        });
    }
    Ok(entries)
}

pub async fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    fs::canonicalize(path).await
}
