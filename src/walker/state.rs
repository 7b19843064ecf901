//! Traversal bookkeeping shared by the blocking and async walkers.
//!
//! The walkers own the I/O; this module decides what each observation means:
//! whether a directory is reported, whether it is descended into, and what a
//! listed child turns into. Directories are kept on an explicit stack so the
//! walk is pre-order and never reads ahead of the consumer.

use std::ffi::OsString;
use std::path::PathBuf;

use log::{debug, trace};

use super::options::WalkOptions;
use super::WalkEntry;
use crate::errors::{FindError, FindResult};
use crate::fs::{EntryInfo, ListedEntry};

/// A directory about to be visited, with the descent budget left for it.
#[derive(Debug)]
pub(crate) struct Dir {
    pub path: PathBuf,
    pub depth: Option<i64>,
    /// Real path, tracked only while following symlinks.
    pub real: Option<PathBuf>,
}

#[derive(Debug)]
pub(crate) enum Pending {
    /// Report the directory itself.
    Enter(Dir),
    /// List its children.
    Descend(Dir),
}

/// What to do on entering a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnterPlan {
    pub report: bool,
    pub descend: bool,
}

/// A child taken from a listing, before any symlink resolution.
#[derive(Debug)]
pub(crate) struct Child {
    pub path: PathBuf,
    pub name: OsString,
    pub info: EntryInfo,
    parent_depth: Option<i64>,
    parent_real: Option<PathBuf>,
}

impl Child {
    pub fn with_info(mut self, info: EntryInfo) -> Self {
        self.info = info;
        self
    }
}

#[derive(Debug)]
struct Frame {
    dir: PathBuf,
    depth: Option<i64>,
    real: Option<PathBuf>,
    children: std::vec::IntoIter<ListedEntry>,
}

#[derive(Debug)]
pub(crate) struct WalkState {
    options: WalkOptions,
    stack: Vec<Frame>,
    pending: Option<Pending>,
}

impl WalkState {
    pub fn new(root: PathBuf, options: WalkOptions) -> Self {
        debug!("Walking {} with {:?}", root.display(), options);
        let depth = options.max_depth;
        Self {
            options,
            stack: Vec::new(),
            pending: Some(Pending::Enter(Dir {
                path: root,
                depth,
                real: None,
            })),
        }
    }

    pub fn follows_symlinks(&self) -> bool {
        self.options.follow_symlinks
    }

    pub fn take_pending(&mut self) -> Option<Pending> {
        self.pending.take()
    }

    /// Drop all remaining work; used once an error has been handed out.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.pending = None;
    }

    pub fn plan_enter(&self, dir: &Dir) -> EnterPlan {
        if dir.depth.map_or(false, |d| d < 0) {
            return EnterPlan {
                report: false,
                descend: false,
            };
        }
        let excluded = self.options.exclude.is_excluded(&dir.path);
        EnterPlan {
            report: self.options.include_dirs && !excluded,
            descend: !excluded && dir.depth.map_or(true, |d| d >= 1),
        }
    }

    /// Refuse to list a directory that is already open further up the chain.
    ///
    /// Only descent can loop; a link back to an ancestor that is merely
    /// reported is fine.
    pub fn check_descent(&self, dir: &Dir) -> FindResult<()> {
        let Some(real) = &dir.real else {
            return Ok(());
        };
        if self.stack.iter().any(|frame| frame.real.as_ref() == Some(real)) {
            return Err(FindError::SymlinkLoop {
                path: dir.path.clone(),
                target: real.clone(),
            });
        }
        Ok(())
    }

    pub fn defer_descend(&mut self, dir: Dir) {
        self.pending = Some(Pending::Descend(dir));
    }

    pub fn push_listing(&mut self, dir: Dir, children: Vec<ListedEntry>) {
        debug!("Listed {} ({} entries)", dir.path.display(), children.len());
        self.stack.push(Frame {
            dir: dir.path,
            depth: dir.depth,
            real: dir.real,
            children: children.into_iter(),
        });
    }

    /// Next child of the innermost unfinished directory.
    pub fn next_child(&mut self) -> Option<Child> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.children.next() {
                Some(entry) => {
                    return Some(Child {
                        path: frame.dir.join(&entry.name),
                        name: entry.name,
                        info: entry.info,
                        parent_depth: frame.depth,
                        parent_real: frame.real.clone(),
                    });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }

    /// Entry for a symlink that is not being followed, if it is wanted.
    pub fn report_symlink(&self, child: &Child) -> Option<WalkEntry> {
        if !self.options.include_symlinks || self.options.exclude.is_excluded(&child.path) {
            return None;
        }
        Some(WalkEntry::new(
            child.path.clone(),
            child.name.to_string_lossy().into_owned(),
            EntryInfo {
                is_file: false,
                is_dir: false,
                is_symlink: true,
            },
        ))
    }

    /// Queue a directory child for descent or turn a file child into an entry.
    ///
    /// `resolved` is the real path of a followed symlink; `child.info` must
    /// already describe the link's target.
    pub fn place(&mut self, child: Child, resolved: Option<PathBuf>) -> FindResult<Option<WalkEntry>> {
        trace!("Classified {} as {:?}", child.path.display(), child.info);

        if child.info.is_dir || child.info.is_symlink {
            let real = resolved.or_else(|| child.parent_real.map(|parent| parent.join(&child.name)));
            self.pending = Some(Pending::Enter(Dir {
                path: child.path,
                depth: child.parent_depth.map(|d| d - 1),
                real,
            }));
            return Ok(None);
        }

        if self.options.include_files && !self.options.exclude.is_excluded(&child.path) {
            return Ok(Some(WalkEntry::new(
                child.path,
                child.name.to_string_lossy().into_owned(),
                child.info,
            )));
        }
        Ok(None)
    }
}
