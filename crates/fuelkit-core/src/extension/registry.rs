//! The name to path mapping of loaded extensions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// In-memory mapping from normalized extension name to resolved directory.
///
/// Entries are created once and never rewritten: inserting an existing key
/// is refused so a loaded extension keeps the path it was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionRegistry {
    entries: BTreeMap<String, PathBuf>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name -> path`. Returns `false` and leaves the existing entry
    /// untouched if `name` is already present.
    pub fn insert(&mut self, name: String, path: PathBuf) -> bool {
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, path);
        true
    }

    /// Removes `name`, returning the path it was registered with.
    pub fn remove(&mut self, name: &str) -> Option<PathBuf> {
        self.entries.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// Copy of the full mapping.
    pub fn snapshot(&self) -> BTreeMap<String, PathBuf> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_write_once() {
        let mut registry = ExtensionRegistry::new();
        assert!(registry.insert("Blog".into(), PathBuf::from("/a/blog")));
        assert!(!registry.insert("Blog".into(), PathBuf::from("/b/blog")));

        assert_eq!(registry.get("Blog"), Some(Path::new("/a/blog")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = ExtensionRegistry::new();
        registry.insert("Blog".into(), PathBuf::from("/a/blog"));
        let snapshot = registry.snapshot();
        registry.remove("Blog");

        assert!(registry.is_empty());
        assert_eq!(snapshot.get("Blog"), Some(&PathBuf::from("/a/blog")));
    }
}
