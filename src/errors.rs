use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for operations that can produce FindError
pub type FindResult<T> = Result<T, FindError>;

/// Errors raised by ancestor search and directory walking.
#[derive(Debug, Error)]
pub enum FindError {
    /// A candidate could not be stat'ed for a reason other than "not found".
    #[error("failed to probe {}: {source}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed during a walk.
    #[error("Error walking path \"{}\": {source}", .path.display())]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stat of a walked path failed, including the re-stat of a resolved symlink.
    #[error("failed to stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A followed symlink could not be resolved.
    #[error("failed to resolve symlink {}: {source}", .path.display())]
    SymlinkResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A followed symlink points back at a directory that is being walked.
    #[error("symlink loop: {} points back to {}", .path.display(), .target.display())]
    SymlinkLoop { path: PathBuf, target: PathBuf },

    /// An async predicate was handed to the blocking search.
    #[error("You are using a async test in sync mode.")]
    SyncPredicateMisuse,

    /// The search was given no file names at all.
    #[error("no candidate file names given")]
    NoCandidateNames,

    /// The stop boundary does not lie on the start directory's ancestor chain.
    #[error("stop boundary {} is not an ancestor of {}", .stop.display(), .start.display())]
    StopOutsideAncestry { start: PathBuf, stop: PathBuf },

    /// The process working directory is unavailable.
    #[error("failed to determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// 模式匹配错误
    #[error("invalid pattern: {message}")]
    PatternError { message: String },
}

impl FindError {
    /// Whether this is the blocking-search misuse error.
    pub fn is_sync_predicate_misuse(&self) -> bool {
        matches!(self, FindError::SyncPredicateMisuse)
    }

    /// The path the failure is about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            FindError::Probe { path, .. }
            | FindError::DirectoryListing { path, .. }
            | FindError::Stat { path, .. }
            | FindError::SymlinkResolution { path, .. }
            | FindError::SymlinkLoop { path, .. } => Some(path),
            FindError::StopOutsideAncestry { stop, .. } => Some(stop),
            _ => None,
        }
    }
}
