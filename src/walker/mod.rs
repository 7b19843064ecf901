//! 目录遍历模块
//!
//! 以先序方式递归遍历目录树，按需（惰性）产生条目。
//! 支持深度限制、按类型包含、路径排除以及符号链接跟随。
//! 提供阻塞迭代器 [`walk_sync`] 和基于 tokio 的异步流 [`walk`] 两种形式。

mod blocking;
pub mod filter;
pub mod options;
mod state;
mod stream;

use std::path::{Path, PathBuf};

use crate::fs::{self, EntryInfo};

pub use self::blocking::{walk_sync, WalkSync};
pub use self::filter::{ExcludeSet, FnMatcher, GlobMatcher, PathMatcher};
pub use self::options::WalkOptions;
pub use self::stream::walk;

/// A single filesystem object observed during a walk.
///
/// A symlink that was not followed has `is_symlink` set and neither of the
/// other flags. A followed symlink reports its target's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Last path component only
    pub name: String,
    /// Full path as reached from the walk root
    pub path: PathBuf,
    pub is_file: bool,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl WalkEntry {
    pub(crate) fn new(path: PathBuf, name: String, info: EntryInfo) -> Self {
        Self {
            name,
            path,
            is_file: info.is_file,
            is_dir: info.is_dir,
            is_symlink: info.is_symlink,
        }
    }

    pub(crate) fn from_dir(path: &Path, info: EntryInfo) -> Self {
        Self::new(path.to_path_buf(), fs::basename(path), info)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Single-letter type marker: `d`, `f`, `l`, or `?` for anything else.
    pub fn type_marker(&self) -> char {
        if self.is_symlink {
            'l'
        } else if self.is_dir {
            'd'
        } else if self.is_file {
            'f'
        } else {
            '?'
        }
    }
}
