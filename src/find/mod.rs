//! 向上查找模块
//!
//! 从起始目录开始逐级向上，在每一级目录中按顺序尝试候选文件名，
//! 返回第一个存在且通过谓词检查的路径。停止目录本身不会被检查。

pub mod options;

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::errors::{FindError, FindResult};
use crate::fs::{self, EntryInfo};

pub use self::options::{FindOptions, Names, Predicate};

/// Find the first of `names` in the start directory or one of its ancestors.
///
/// Names are tried in order at each level before moving to the parent.
/// Returns `Ok(None)` when the stop boundary is reached without a match.
///
/// # Examples
/// ```no_run
/// use elysius::{find, FindOptions};
///
/// # async fn run() -> elysius::FindResult<()> {
/// let manifest = find("Cargo.toml", &FindOptions::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn find<N: Into<Names>>(names: N, options: &FindOptions) -> FindResult<Option<PathBuf>> {
    let names = names.into();
    names.ensure_non_empty()?;
    let (start, stop) = search_bounds(options)?;
    debug!("Searching {:?} upward from {} to {}", names, start.display(), stop.display());

    for dir in levels(&start, &stop) {
        for name in names.iter() {
            let file = fs::resolve(dir, name);
            let found = probe(&file, fs::nonblocking::stat(&file).await)?;
            if !found {
                continue;
            }
            let accepted = match &options.test {
                Some(test) => test.evaluate(&file).await,
                None => true,
            };
            if accepted {
                debug!("Found {}", file.display());
                return Ok(Some(file));
            }
        }
    }

    Ok(None)
}

/// Blocking form of [`find`].
///
/// Fails with [`FindError::SyncPredicateMisuse`] before touching the
/// filesystem when `options.test` is an async predicate.
pub fn find_sync<N: Into<Names>>(names: N, options: &FindOptions) -> FindResult<Option<PathBuf>> {
    let test = match &options.test {
        Some(Predicate::Async(_)) => return Err(FindError::SyncPredicateMisuse),
        Some(Predicate::Sync(test)) => Some(test),
        None => None,
    };

    let names = names.into();
    names.ensure_non_empty()?;
    let (start, stop) = search_bounds(options)?;
    debug!("Searching {:?} upward from {} to {}", names, start.display(), stop.display());

    for dir in levels(&start, &stop) {
        for name in names.iter() {
            let file = fs::resolve(dir, name);
            if probe(&file, fs::stat(&file))? && test.map_or(true, |test| test(file.as_path())) {
                debug!("Found {}", file.display());
                return Ok(Some(file));
            }
        }
    }

    Ok(None)
}

/// Resolve the absolute start directory and stop boundary once, at entry.
fn search_bounds(options: &FindOptions) -> FindResult<(PathBuf, PathBuf)> {
    search_bounds_with(options, fs::current_dir)
}

/// The working directory is consulted only when a path is relative.
fn search_bounds_with<F>(options: &FindOptions, current_dir: F) -> FindResult<(PathBuf, PathBuf)>
where
    F: Fn() -> io::Result<PathBuf>,
{
    let absolute = |path: Option<&Path>| -> FindResult<PathBuf> {
        match path {
            Some(path) if path.is_absolute() => Ok(fs::normalize_path(path)),
            Some(path) => Ok(fs::resolve(&current_dir().map_err(FindError::CurrentDir)?, path)),
            None => Ok(fs::normalize_path(&current_dir().map_err(FindError::CurrentDir)?)),
        }
    };

    let start = absolute(options.cwd.as_deref())?;
    let stop = match &options.stop {
        Some(stop) => absolute(Some(stop.as_path()))?,
        None => fs::filesystem_root(&start),
    };

    if !start.starts_with(&stop) {
        return Err(FindError::StopOutsideAncestry { start, stop });
    }
    Ok((start, stop))
}

/// Directories to probe, innermost first, excluding `stop`.
fn levels<'a>(start: &'a Path, stop: &'a Path) -> impl Iterator<Item = &'a Path> {
    start.ancestors().take_while(move |dir| *dir != stop)
}

/// Not-found means "try the next candidate"; any other failure aborts.
fn probe(path: &Path, result: io::Result<EntryInfo>) -> FindResult<bool> {
    match result {
        Ok(_) => {
            trace!("Probe hit: {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            trace!("Probe miss: {}", path.display());
            Ok(false)
        }
        Err(source) => Err(FindError::Probe {
            path: path.to_path_buf(),
            source,
        }),
    }
}
