//! Options for directory walking
//!
//! This module provides options for configuring a recursive walk.

use super::filter::{ExcludeSet, GlobMatcher, PathMatcher};
use crate::errors::FindResult;

/// Options for configuring a recursive walk
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Directory levels to descend below the root (None for unlimited,
    /// negative for an empty walk)
    pub max_depth: Option<i64>,

    /// Whether to yield file entries
    pub include_files: bool,

    /// Whether to yield directory entries
    pub include_dirs: bool,

    /// Whether to yield symlinks that are not followed
    pub include_symlinks: bool,

    /// Whether to resolve symlinks and descend through them
    pub follow_symlinks: bool,

    /// Paths to leave out, together with their subtrees
    pub exclude: ExcludeSet,
}

impl WalkOptions {
    /// Create a new WalkOptions with default values
    pub fn new() -> Self {
        Self {
            max_depth: None,
            include_files: true,
            include_dirs: true,
            include_symlinks: true,
            follow_symlinks: false,
            exclude: ExcludeSet::new(),
        }
    }

    /// Set the maximum depth to walk
    pub fn with_max_depth(mut self, max_depth: Option<i64>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_include_files(mut self, include: bool) -> Self {
        self.include_files = include;
        self
    }

    pub fn with_include_dirs(mut self, include: bool) -> Self {
        self.include_dirs = include;
        self
    }

    pub fn with_include_symlinks(mut self, include: bool) -> Self {
        self.include_symlinks = include;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Add a glob exclusion pattern
    pub fn with_exclude(mut self, pattern: &str) -> FindResult<Self> {
        self.exclude.push(GlobMatcher::new(pattern)?);
        Ok(self)
    }

    /// Add a custom exclusion rule
    pub fn with_exclude_matcher(mut self, matcher: impl PathMatcher + 'static) -> Self {
        self.exclude.push(matcher);
        self
    }

    /// Replace the exclusion rules
    pub fn with_exclude_set(mut self, exclude: ExcludeSet) -> Self {
        self.exclude = exclude;
        self
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::new()
    }
}
