//! 文件系统访问层
//!
//! Thin wrappers over `std::fs` (and `tokio::fs` in [`nonblocking`]) that
//! report entries as plain type flags, plus lexical path helpers.

pub mod nonblocking;

use std::ffi::OsString;
use std::fs::{self, FileType};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Type flags observed for a single filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryInfo {
    pub is_file: bool,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl From<FileType> for EntryInfo {
    fn from(file_type: FileType) -> Self {
        Self {
            is_file: file_type.is_file(),
            is_dir: file_type.is_dir(),
            is_symlink: file_type.is_symlink(),
        }
    }
}

/// One child of a listed directory, typed from the listing itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: OsString,
    pub info: EntryInfo,
}

/// Stat following symlinks.
pub fn stat(path: &Path) -> io::Result<EntryInfo> {
    fs::metadata(path).map(|m| m.file_type().into())
}

/// Stat without following a final symlink.
pub fn stat_no_follow(path: &Path) -> io::Result<EntryInfo> {
    fs::symlink_metadata(path).map(|m| m.file_type().into())
}

/// Read the immediate children of `path` in the order the OS returns them.
///
/// The whole listing is collected before returning so the directory handle
/// is closed again by the time the caller looks at the children.
pub fn list_directory(path: &Path) -> io::Result<Vec<ListedEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        entries.push(ListedEntry {
            name: entry.file_name(),
            info: entry.file_type()?.into(),
        });
    }
    Ok(entries)
}

/// Resolve every symlink in `path`, returning the real absolute path.
pub fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    fs::canonicalize(path)
}

pub fn current_dir() -> io::Result<PathBuf> {
    std::env::current_dir()
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                result.push(component.as_os_str());
                depth = 0;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    result.pop();
                    depth -= 1;
                } else if !path.has_root() {
                    result.push("..");
                }
            }
            Component::Normal(s) => {
                result.push(s);
                depth += 1;
            }
        }
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}

/// Make `path` absolute against `base` and normalize it.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// The filesystem root that `path` hangs off (`/` on unix, `C:\` on windows).
pub fn filesystem_root(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Last path component as a string, or the whole path when there is none (e.g. `/`).
pub fn basename(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
