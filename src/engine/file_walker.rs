//! File discovery and traversal with gitignore support
//!
//! This module provides gitignore-aware file walking with glob-based filtering
//! for the text files handed to the conformance engine.

use crate::types::GlobPattern;
use globset::{Glob, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// File did not match include patterns, or matched an exclude pattern
    ExcludedByPattern,
    /// File is not a regular file (e.g., directory, symlink)
    NotAFile,
}

/// Result of file walking - either a file to scan or a skipped file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    File(FileEntry),
    Skipped { path: PathBuf, reason: SkipReason },
}

/// A discovered text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Iterator over discovered files
pub struct FileWalker {
    walker: ignore::Walk,
    include_set: Option<globset::GlobSet>,
    exclude_set: globset::GlobSet,
    verbose: bool,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Root directory to walk
    /// * `include` - Include patterns (empty means include all)
    /// * `exclude` - Exclude patterns (applied after include)
    pub fn new(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
    ) -> Result<Self, FileWalkerError> {
        Self::with_verbose(root, include, exclude, false)
    }

    /// Creates a new FileWalker that also reports skipped paths
    pub fn with_verbose(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        let walker = WalkBuilder::new(root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true) // Respect .gitignore
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        let include_set = if include.is_empty() {
            None
        } else {
            Some(Self::build_globset(include)?)
        };

        // Always exclude .git directory, merging with user-provided excludes
        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push(GlobPattern::new("**/.git/**"));
        let exclude_set = Self::build_globset(&exclude_patterns)?;

        Ok(Self {
            walker,
            include_set,
            exclude_set,
            verbose,
        })
    }

    /// Builds a GlobSet from patterns
    pub(crate) fn build_globset(
        patterns: &[GlobPattern],
    ) -> Result<globset::GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_str()).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Walks the directory tree and returns an iterator over matching files
    pub fn walk(self) -> impl Iterator<Item = Result<FileEntry, FileWalkerError>> {
        self.walk_with_skip_info()
            .filter_map(|result| match result {
                Ok(WalkResult::File(file)) => Some(Ok(file)),
                Ok(WalkResult::Skipped { .. }) => None,
                Err(e) => Some(Err(e)),
            })
    }

    /// Walks the directory tree and returns an iterator with skip information
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let include_set = self.include_set;
        let exclude_set = self.exclude_set;
        let verbose = self.verbose;

        let skipped = move |path: &Path,
                            reason: SkipReason|
              -> Option<Result<WalkResult, FileWalkerError>> {
            verbose.then(|| {
                Ok(WalkResult::Skipped {
                    path: path.to_path_buf(),
                    reason,
                })
            })
        };

        self.walker.filter_map(move |result| match result {
            Ok(entry) => {
                let path = entry.path();

                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return skipped(path, SkipReason::NotAFile);
                }

                if let Some(ref include_set) = include_set
                    && !include_set.is_match(path)
                {
                    return skipped(path, SkipReason::ExcludedByPattern);
                }

                if exclude_set.is_match(path) {
                    return skipped(path, SkipReason::ExcludedByPattern);
                }

                Some(Ok(WalkResult::File(FileEntry::new(path.to_path_buf()))))
            }
            Err(e) => Some(Err(FileWalkerError::Walk(e))),
        })
    }
}
