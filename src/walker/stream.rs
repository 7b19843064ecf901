//! Async directory walking on top of `tokio::fs`.

use std::path::Path;

use futures::stream::{self, Stream};

use super::state::{Pending, WalkState};
use super::{WalkEntry, WalkOptions};
use crate::errors::{FindError, FindResult};
use crate::fs::{self, nonblocking};

/// Walk `root` recursively as an async stream.
///
/// Same entries, order and errors as [`walk_sync`](super::walk_sync). Each
/// poll performs only the I/O needed for the next entry, so dropping the
/// stream stops the walk. The stream ends after the first error.
///
/// # Examples
/// ```no_run
/// use elysius::{walk, WalkOptions};
/// use futures::TryStreamExt;
///
/// # async fn run() -> elysius::FindResult<()> {
/// let entries: Vec<_> = walk("src", WalkOptions::new()).try_collect().await?;
/// # Ok(())
/// # }
/// ```
pub fn walk<P: AsRef<Path>>(
    root: P,
    options: WalkOptions,
) -> impl Stream<Item = FindResult<WalkEntry>> + Send + 'static {
    let walker = StreamWalker {
        state: WalkState::new(root.as_ref().to_path_buf(), options),
    };
    stream::try_unfold(walker, |mut walker| async move {
        let next = walker.advance().await?;
        Ok::<_, FindError>(next.map(|entry| (entry, walker)))
    })
}

struct StreamWalker {
    state: WalkState,
}

impl StreamWalker {
    async fn advance(&mut self) -> FindResult<Option<WalkEntry>> {
        loop {
            match self.state.take_pending() {
                Some(Pending::Enter(dir)) => {
                    let plan = self.state.plan_enter(&dir);
                    let entry = if plan.report {
                        let info = nonblocking::stat(&dir.path).await.map_err(|source| {
                            FindError::Stat {
                                path: dir.path.clone(),
                                source,
                            }
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
                        dir.real = nonblocking::resolve_symlink(&dir.path).await.ok();
                    }
                    self.state.check_descent(&dir)?;
                    let children = nonblocking::list_directory(&dir.path).await.map_err(|source| {
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

                    let real = nonblocking::resolve_symlink(&child.path).await.map_err(|source| {
                        FindError::SymlinkResolution {
                            path: child.path.clone(),
                            source,
                        }
                    })?;
                    let info = nonblocking::stat_no_follow(&real).await.map_err(|source| {
                        FindError::Stat {
                            path: real.clone(),
                            source,
                        }
                    })?;
                    if let Some(entry) = self.state.place(child.with_info(info), Some(real))? {
                        return Ok(Some(entry));
                    }
                }
            }
        }
    }
}
