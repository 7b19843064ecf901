//! Path exclusion
//!
//! This module provides matchers that decide whether a walked path is
//! excluded. A matching directory is neither reported nor descended into.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use glob::{MatchOptions, Pattern};

use crate::errors::{FindError, FindResult};

/// Trait for exclusion rules, tested against the full path of an entry
pub trait PathMatcher: Send + Sync {
    /// Check if the path matches the rule
    fn matches(&self, path: &Path) -> bool;

    /// Get the rule description
    fn description(&self) -> String;
}

/// Glob pattern matched against the whole path.
///
/// `*` also matches `/`, so `*.log` excludes every `.log` file at any depth
/// and `*/target` excludes every directory named `target`.
pub struct GlobMatcher {
    pattern: Pattern,
    original_pattern: String,
    ignore_case: bool,
}

impl GlobMatcher {
    /// Create a new GlobMatcher with the given pattern
    pub fn new(pattern: &str) -> FindResult<Self> {
        let compiled_pattern = Pattern::new(pattern).map_err(|e| FindError::PatternError {
            message: format!("Invalid pattern '{}': {}", pattern, e),
        })?;

        Ok(Self {
            pattern: compiled_pattern,
            original_pattern: pattern.to_string(),
            ignore_case: false,
        })
    }

    /// Create a new case-insensitive GlobMatcher
    pub fn new_ignore_case(pattern: &str) -> FindResult<Self> {
        let mut matcher = Self::new(pattern)?;
        matcher.ignore_case = true;
        Ok(matcher)
    }

    fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_sensitive: !self.ignore_case,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        }
    }
}

impl PathMatcher for GlobMatcher {
    fn matches(&self, path: &Path) -> bool {
        self.pattern.matches_path_with(path, self.match_options())
    }

    fn description(&self) -> String {
        if self.ignore_case {
            format!("path (ignore case) matches '{}'", self.original_pattern)
        } else {
            format!("path matches '{}'", self.original_pattern)
        }
    }
}

/// Arbitrary caller-supplied rule.
pub struct FnMatcher<F> {
    matcher: F,
    description: String,
}

impl<F> FnMatcher<F>
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    pub fn new(description: impl Into<String>, matcher: F) -> Self {
        Self {
            matcher,
            description: description.into(),
        }
    }
}

impl<F> PathMatcher for FnMatcher<F>
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn matches(&self, path: &Path) -> bool {
        (self.matcher)(path)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

/// Set of exclusion rules; a path is excluded when any rule matches.
#[derive(Clone, Default)]
pub struct ExcludeSet {
    matchers: Vec<Arc<dyn PathMatcher>>,
}

impl ExcludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile glob patterns into a set
    pub fn from_patterns(patterns: &[String], ignore_case: bool) -> FindResult<Self> {
        let mut set = Self::new();
        for pattern in patterns {
            let matcher = if ignore_case {
                GlobMatcher::new_ignore_case(pattern)?
            } else {
                GlobMatcher::new(pattern)?
            };
            set.push(matcher);
        }
        Ok(set)
    }

    pub fn push(&mut self, matcher: impl PathMatcher + 'static) {
        self.matchers.push(Arc::new(matcher));
    }

    /// Append every rule of `other`.
    pub fn extend(&mut self, other: ExcludeSet) {
        self.matchers.extend(other.matchers);
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.matchers.iter().any(|matcher| matcher.matches(path))
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.matchers.iter().map(|m| m.description()).collect()
    }
}

impl fmt::Debug for ExcludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.descriptions()).finish()
    }
}
