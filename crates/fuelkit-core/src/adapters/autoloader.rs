//! Namespace binder: the autoloader collaborator.
//!
//! Class resolution itself belongs to the host; the registry only needs to
//! declare which directory serves which namespace prefix, plus individual
//! class files declared by package bootstraps.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Binds namespace prefixes and single classes to source locations.
pub trait NamespaceBinder: Send + Sync {
    /// Binds `prefix` to `dir`, replacing any earlier binding.
    fn add_namespace(&self, prefix: &str, dir: &Path);

    /// Drops the binding for `prefix`. Returns `true` if one existed.
    fn remove_namespace(&self, prefix: &str) -> bool;

    /// Directory currently bound to `prefix`.
    fn namespace_path(&self, prefix: &str) -> Option<PathBuf>;

    /// Maps a fully-qualified class name to the file that defines it.
    fn add_class(&self, class: &str, file: &Path);

    /// File registered for `class`.
    fn class_path(&self, class: &str) -> Option<PathBuf>;
}

/// In-process namespace table.
///
/// Prefixes are stored without leading or trailing `\`, so `\Blog\` and
/// `Blog` address the same entry.
#[derive(Debug, Default)]
pub struct NamespaceMap {
    namespaces: Mutex<BTreeMap<String, PathBuf>>,
    classes: Mutex<BTreeMap<String, PathBuf>>,
}

impl NamespaceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every bound prefix.
    pub fn namespaces(&self) -> BTreeMap<String, PathBuf> {
        self.namespaces.lock().unwrap().clone()
    }

    /// Snapshot of every registered class.
    pub fn classes(&self) -> BTreeMap<String, PathBuf> {
        self.classes.lock().unwrap().clone()
    }
}

fn trim_ns(name: &str) -> &str {
    name.trim_matches('\\')
}

impl NamespaceBinder for NamespaceMap {
    fn add_namespace(&self, prefix: &str, dir: &Path) {
        tracing::debug!(prefix, dir = %dir.display(), "binding namespace");
        self.namespaces
            .lock()
            .unwrap()
            .insert(trim_ns(prefix).to_string(), dir.to_path_buf());
    }

    fn remove_namespace(&self, prefix: &str) -> bool {
        self.namespaces
            .lock()
            .unwrap()
            .remove(trim_ns(prefix))
            .is_some()
    }

    fn namespace_path(&self, prefix: &str) -> Option<PathBuf> {
        self.namespaces.lock().unwrap().get(trim_ns(prefix)).cloned()
    }

    fn add_class(&self, class: &str, file: &Path) {
        self.classes
            .lock()
            .unwrap()
            .insert(trim_ns(class).to_string(), file.to_path_buf());
    }

    fn class_path(&self, class: &str) -> Option<PathBuf> {
        self.classes.lock().unwrap().get(trim_ns(class)).cloned()
    }
}
