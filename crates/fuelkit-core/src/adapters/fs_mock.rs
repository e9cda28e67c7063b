//! In-memory file system adapter for tests.
//!
//! Directories and files are tracked separately; adding a file or a
//! directory also registers every ancestor directory, so probes behave like
//! a real tree.

use crate::adapters::fs::FsAdapter;
use crate::error::{FuelError, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock file system adapter for testing.
///
/// # Examples
///
/// ```
/// use fuelkit_core::adapters::fs::FsAdapter;
/// use fuelkit_core::adapters::fs_mock::MockFsAdapter;
/// use std::path::Path;
///
/// let fs = MockFsAdapter::new();
/// fs.add_file("/app/modules/blog/config/routes.toml", "about = \"blog/about\"");
/// assert!(fs.is_dir(Path::new("/app/modules/blog")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFsAdapter {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    dirs: Arc<Mutex<BTreeSet<PathBuf>>>,
}

impl MockFsAdapter {
    /// Creates an empty mock file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the mock file system with files (and their parents).
    pub fn with_files(files: HashMap<PathBuf, String>) -> Self {
        let fs = Self::new();
        for (path, content) in files {
            fs.add_file(path, content);
        }
        fs
    }

    /// Registers a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Writes a file, registering its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.into());
    }

    /// Removes every file and directory.
    pub fn clear(&self) {
        self.files.lock().unwrap().clear();
        self.dirs.lock().unwrap().clear();
    }
}

impl FsAdapter for MockFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| FuelError::PathNotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file_registers_parents() {
        let fs = MockFsAdapter::new();
        fs.add_file("/ext/blog/config/routes.toml", "");

        assert!(fs.is_file(Path::new("/ext/blog/config/routes.toml")));
        assert!(fs.is_dir(Path::new("/ext/blog/config")));
        assert!(fs.is_dir(Path::new("/ext/blog")));
        assert!(fs.is_dir(Path::new("/ext")));
        assert!(!fs.is_dir(Path::new("/ext/blog/config/routes.toml")));
    }

    #[test]
    fn test_mock_fs_trailing_separator_is_same_dir() {
        let fs = MockFsAdapter::new();
        fs.add_dir("/ext/blog/");

        assert!(fs.is_dir(Path::new("/ext/blog")));
        assert!(fs.is_dir(Path::new("/ext/blog/")));
    }

    #[test]
    fn test_mock_fs_file_not_found() {
        let fs = MockFsAdapter::new();
        let result = fs.read_to_string(Path::new("/nonexistent.toml"));

        assert!(matches!(result.unwrap_err(), FuelError::PathNotFound(_)));
    }

    #[test]
    fn test_mock_fs_with_files() {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/pkgs/auth/bootstrap.toml"), "[classes]".to_string());

        let fs = MockFsAdapter::with_files(files);

        assert_eq!(
            fs.read_to_string(Path::new("/pkgs/auth/bootstrap.toml")).unwrap(),
            "[classes]"
        );
        assert!(fs.is_dir(Path::new("/pkgs/auth")));
    }

    #[test]
    fn test_mock_fs_clear() {
        let fs = MockFsAdapter::new();
        fs.add_file("/a/b.toml", "x");
        fs.clear();

        assert!(!fs.exists(Path::new("/a/b.toml")));
        assert!(!fs.exists(Path::new("/a")));
    }
}
