use anyhow::{Context, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Enumerates candidate files under a root, pruning excluded directories
#[derive(Debug)]
pub struct TreeWalker {
    root: PathBuf,
    scope: GlobSet,
    exclude_dirs: Vec<String>,
}

impl TreeWalker {
    pub fn new(root: &Path, scope: &[String], exclude_dirs: &[String]) -> anyhow::Result<Self> {
        if !root.is_dir() {
            bail!("Scan root {} is not a directory", root.display());
        }
        Ok(Self {
            root: root.to_path_buf(),
            scope: build_globset(scope)?,
            exclude_dirs: exclude_dirs.to_vec(),
        })
    }

    /// Lazily walk the tree in file-name order.
    ///
    /// Each call starts a fresh walk. Unreadable entries are skipped.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry))
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.in_scope(entry.path()))
            .map(DirEntry::into_path)
    }

    /// Path relative to the root, with `/` separators
    pub fn relative(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let excluded = self.is_excluded_name(entry.file_name());
        if excluded {
            trace!("Pruning excluded directory {}", entry.path().display());
        }
        excluded
    }

    fn is_excluded_name(&self, name: &OsStr) -> bool {
        self.exclude_dirs.iter().any(|d| OsStr::new(d) == name)
    }

    fn in_scope(&self, path: &Path) -> bool {
        self.scope.is_match(self.relative(path))
    }
}

fn build_globset(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("Invalid scope pattern '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("Failed to build scope globset")
}
