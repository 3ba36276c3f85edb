// File discovery for a source tree

pub mod patterns;

pub use patterns::*;

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into: build output and VCS metadata
pub const EXCLUDED_DIRS: [&str; 2] = ["target", ".git"];

/// A file found under the scanned root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the scanned root
    pub relative: PathBuf,
}

impl DiscoveredFile {
    /// Relative path with `/` separators, used for sorting and labels
    pub fn label(&self) -> String {
        slash_path(&self.relative)
    }
}

/// Render a path with `/` between components
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks a root directory and collects the files the registry claims
pub struct Discoverer<'a> {
    registry: &'a PatternRegistry,
    exclude: Vec<glob::Pattern>,
}

impl<'a> Discoverer<'a> {
    pub fn new(registry: &'a PatternRegistry) -> Self {
        Self {
            registry,
            exclude: Vec::new(),
        }
    }

    /// Add globs matched against relative paths
    pub fn with_excludes<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self.exclude.push(glob::Pattern::new(pattern.as_ref())?);
        }
        Ok(self)
    }

    /// Find matching files under `root`, sorted by relative path.
    ///
    /// Only direct children are considered unless `recursive` is set, and
    /// subpath-anchored patterns only apply in recursive mode. Finding
    /// nothing is an error.
    pub fn discover(&self, root: &Path, recursive: bool) -> Result<Vec<DiscoveredFile>> {
        if !root.is_dir() {
            return Err(Error::DirectoryNotFound(root.to_path_buf()));
        }

        let mut walker = WalkDir::new(root).min_depth(1);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();

        for entry in walker.into_iter().filter_entry(|e| !is_excluded_dir(e)) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.path().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };

            if !self.is_candidate(relative, recursive) || self.is_excluded(relative) {
                continue;
            }

            files.push(DiscoveredFile {
                path: entry.path().to_path_buf(),
                relative: relative.to_path_buf(),
            });
        }

        files.sort_by_cached_key(DiscoveredFile::label);
        files.dedup_by(|a, b| a.relative == b.relative);

        debug!("Discovered {} files under {}", files.len(), root.display());

        if files.is_empty() {
            return Err(Error::NoFilesFound(root.to_path_buf()));
        }

        Ok(files)
    }

    fn is_candidate(&self, relative: &Path, recursive: bool) -> bool {
        self.registry.lookup_primary(relative).is_match()
            || (recursive && self.registry.lookup_secondary(relative).is_match())
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        if relative
            .components()
            .any(|c| EXCLUDED_DIRS.iter().any(|d| c.as_os_str() == OsStr::new(d)))
        {
            return true;
        }

        if self.exclude.is_empty() {
            return false;
        }

        let label = slash_path(relative);
        self.exclude.iter().any(|p| p.matches(&label))
    }
}

/// Prune excluded directories below the root
fn is_excluded_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name))
}
