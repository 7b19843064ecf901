//! Options for ancestor search
//!
//! This module provides the candidate name list, the match predicate and
//! the options controlling where an upward search starts and stops.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::errors::{FindError, FindResult};

type SyncTest = dyn Fn(&Path) -> bool + Send + Sync;
type AsyncTest = dyn Fn(PathBuf) -> BoxFuture<'static, bool> + Send + Sync;

/// Gate deciding whether an existing candidate counts as a match.
///
/// The variant is the execution mode: [`find_sync`](crate::find_sync) rejects
/// `Async` up front instead of trying to drive the future.
#[derive(Clone)]
pub enum Predicate {
    /// Evaluated inline.
    Sync(Arc<SyncTest>),
    /// Evaluated by awaiting the returned future.
    Async(Arc<AsyncTest>),
}

impl Predicate {
    /// Wrap a blocking test.
    pub fn sync<F>(test: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        Predicate::Sync(Arc::new(test))
    }

    /// Wrap an async test. The candidate path is passed by value so the
    /// future can own it.
    pub fn from_async<F, Fut>(test: F) -> Self
    where
        F: Fn(PathBuf) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Predicate::Async(Arc::new(move |path: PathBuf| -> BoxFuture<'static, bool> {
            test(path).boxed()
        }))
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Predicate::Async(_))
    }

    pub(crate) async fn evaluate(&self, path: &Path) -> bool {
        match self {
            Predicate::Sync(test) => test(path),
            Predicate::Async(test) => test(path.to_path_buf()).await,
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Sync(_) => f.write_str("Predicate::Sync(..)"),
            Predicate::Async(_) => f.write_str("Predicate::Async(..)"),
        }
    }
}

/// Ordered candidate file names, tried in order at every directory level.
///
/// Built from a single name or a sequence of names; both mean the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names(Vec<PathBuf>);

impl Names {
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn ensure_non_empty(&self) -> FindResult<()> {
        if self.0.is_empty() {
            return Err(FindError::NoCandidateNames);
        }
        Ok(())
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names(vec![PathBuf::from(name)])
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names(vec![PathBuf::from(name)])
    }
}

impl From<&Path> for Names {
    fn from(name: &Path) -> Self {
        Names(vec![name.to_path_buf()])
    }
}

impl From<PathBuf> for Names {
    fn from(name: PathBuf) -> Self {
        Names(vec![name])
    }
}

impl<T: Into<PathBuf>> From<Vec<T>> for Names {
    fn from(names: Vec<T>) -> Self {
        Names(names.into_iter().map(Into::into).collect())
    }
}

impl<T: AsRef<Path>> From<&[T]> for Names {
    fn from(names: &[T]) -> Self {
        Names(names.iter().map(|n| n.as_ref().to_path_buf()).collect())
    }
}

impl<T: Into<PathBuf>, const N: usize> From<[T; N]> for Names {
    fn from(names: [T; N]) -> Self {
        Names(names.into_iter().map(Into::into).collect())
    }
}

/// Options for configuring an ancestor search
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    /// Directory the search starts in (default: process working directory)
    pub cwd: Option<PathBuf>,

    /// Exclusive upper boundary (default: filesystem root of `cwd`)
    pub stop: Option<PathBuf>,

    /// Extra condition a candidate must satisfy (default: any existing entry)
    pub test: Option<Predicate>,
}

impl FindOptions {
    /// Create a new FindOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to start searching from
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Set the directory to stop searching at
    pub fn with_stop(mut self, stop: impl Into<PathBuf>) -> Self {
        self.stop = Some(stop.into());
        self
    }

    /// Set the predicate gating a match
    pub fn with_test(mut self, test: Predicate) -> Self {
        self.test = Some(test);
        self
    }
}
