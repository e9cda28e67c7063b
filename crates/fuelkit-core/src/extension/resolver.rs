//! Path resolution for extensions.

use crate::adapters::fs::FsAdapter;
use crate::error::{FuelError, Result};
use crate::extension::{ExtensionKind, dir_name};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Locates an extension directory on an ordered list of search roots.
///
/// Modules are configured with every module path, packages with the single
/// package root. The candidate for a name is `root/<lowercase name>/`.
pub struct PathResolver {
    kind: ExtensionKind,
    roots: Vec<PathBuf>,
    base: Option<PathBuf>,
    fs: Arc<dyn FsAdapter>,
}

impl PathResolver {
    pub fn new(kind: ExtensionKind, roots: Vec<PathBuf>, fs: Arc<dyn FsAdapter>) -> Self {
        Self {
            kind,
            roots,
            base: None,
            fs,
        }
    }

    /// Resolves relative explicit paths against `base`, usually the
    /// application root.
    pub fn with_base(mut self, base: PathBuf) -> Self {
        self.base = Some(base);
        self
    }

    /// Search roots in lookup order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolves `name` to a directory.
    ///
    /// An explicit path wins over the search roots. A relative one is taken
    /// from the base directory; either way it must be an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::NotFound` when no candidate directory exists.
    pub fn resolve(&self, name: &str, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            let path = match &self.base {
                Some(base) if path.is_relative() => normalize_dir(&base.join(path)),
                _ => normalize_dir(path),
            };
            if !self.fs.is_dir(&path) {
                tracing::debug!(kind = %self.kind, name, path = %path.display(), "explicit path is not a directory");
                return Err(FuelError::not_found(self.kind, name));
            }
            return Ok(path);
        }

        self.search(name)
            .ok_or_else(|| FuelError::not_found(self.kind, name))
    }

    /// First search root containing a directory for `name`.
    pub fn search(&self, name: &str) -> Option<PathBuf> {
        let dir = dir_name(name);
        if dir.is_empty() {
            return None;
        }
        let found = self
            .roots
            .iter()
            .map(|root| normalize_dir(&root.join(&dir)))
            .find(|candidate| self.fs.is_dir(candidate));

        tracing::debug!(kind = %self.kind, name, found = ?found, "searched extension roots");
        found
    }
}

impl std::fmt::Debug for PathResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathResolver")
            .field("kind", &self.kind)
            .field("roots", &self.roots)
            .field("base", &self.base)
            .field("fs", &"Arc<dyn FsAdapter>")
            .finish()
    }
}

/// Rebuilds `path` from its components, dropping repeated and trailing
/// separators as well as `.` segments.
pub fn normalize_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
