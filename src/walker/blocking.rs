//! 阻塞式目录遍历
//!
//! 基于迭代器的遍历器，每次调用 `next` 只执行产生下一个条目所需的文件系统操作。

use std::iter::FusedIterator;
use std::path::Path;

use super::state::{Pending, WalkState};
use super::{WalkEntry, WalkOptions};
use crate::errors::{FindError, FindResult};
use crate::fs;

/// Walk `root` recursively, blocking on each filesystem call.
///
/// Entries come out in pre-order; siblings keep the order the OS lists them
/// in. The first error ends the iteration.
///
/// # Examples
/// ```no_run
/// use elysius::{walk_sync, WalkOptions};
///
/// for entry in walk_sync("src", WalkOptions::new().with_include_dirs(false)) {
///     println!("{}", entry?.path.display());
/// }
/// # Ok::<(), elysius::FindError>(())
/// ```
pub fn walk_sync<P: AsRef<Path>>(root: P, options: WalkOptions) -> WalkSync {
    WalkSync {
        state: WalkState::new(root.as_ref().to_path_buf(), options),
        done: false,
    }
}

/// 阻塞式遍历迭代器，由 [`walk_sync`] 创建
#[derive(Debug)]
pub struct WalkSync {
    state: WalkState,
    done: bool,
}

impl Iterator for WalkSync {
    type Item = FindResult<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                self.state.clear();
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for WalkSync {}

impl WalkSync {
    /// 推进遍历直到产生下一个条目或结束
    fn advance(&mut self) -> FindResult<Option<WalkEntry>> {
        loop {
            match self.state.take_pending() {
                Some(Pending::Enter(dir)) => {
                    let plan = self.state.plan_enter(&dir);
                    let entry = if plan.report {
                        let info = fs::stat(&dir.path).map_err(|source| FindError::Stat {
                            path: dir.path.clone(),
                            source,
                        })?;
                        Some(WalkEntry::from_dir(&dir.path, info))
                    } else {
                        None
                    };
                    if plan.descend {
                        self.state.defer_descend(dir);
                    }
                    if entry.is_some() {
                        return Ok(entry);
                    }
                }
                Some(Pending::Descend(mut dir)) => {
                    if self.state.follows_symlinks() && dir.real.is_none() {
                        // Only the walk root gets here; if it cannot be resolved
                        // the listing below fails and reports why.
                        dir.real = fs::resolve_symlink(&dir.path).ok();
                    }
                    self.state.check_descent(&dir)?;
                    let children = fs::list_directory(&dir.path).map_err(|source| {
                        FindError::DirectoryListing {
                            path: fs::normalize_path(&dir.path),
                            source,
                        }
                    })?;
                    self.state.push_listing(dir, children);
                }
                None => {
                    let Some(child) = self.state.next_child() else {
                        return Ok(None);
                    };

                    if !child.info.is_symlink {
                        if let Some(entry) = self.state.place(child, None)? {
                            return Ok(Some(entry));
                        }
                        continue;
                    }

                    if !self.state.follows_symlinks() {
                        if let Some(entry) = self.state.report_symlink(&child) {
                            return Ok(Some(entry));
                        }
                        continue;
                    }

                    let real = fs::resolve_symlink(&child.path).map_err(|source| {
                        FindError::SymlinkResolution {
                            path: child.path.clone(),
                            source,
                        }
                    })?;
                    // The entity may have been swapped since the listing; trust
                    // only what the resolved path looks like now.
                    let info = fs::stat_no_follow(&real).map_err(|source| FindError::Stat {
                        path: real.clone(),
                        source,
                    })?;
                    if let Some(entry) = self.state.place(child.with_info(info), Some(real))? {
                        return Ok(Some(entry));
                    }
                }
            }
        }
    }
}
