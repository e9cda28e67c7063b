//! Standard file system adapter backed by `std::fs`.

use crate::adapters::fs::FsAdapter;
use crate::error::{FuelError, Result};
use std::path::Path;

/// Standard file system adapter using `std::fs`.
#[derive(Debug, Default)]
pub struct StdFsAdapter;

impl StdFsAdapter {
    /// Creates a new standard file system adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FsAdapter for StdFsAdapter {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FuelError::PathNotFound(path.to_path_buf())
            } else {
                FuelError::FileReadError(format!("{}: {}", path.display(), e))
            }
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.toml");
        std::fs::write(&file_path, "about = \"blog/about\"").unwrap();

        let adapter = StdFsAdapter::new();
        let content = adapter.read_to_string(&file_path).unwrap();
        assert_eq!(content, "about = \"blog/about\"");
    }

    #[test]
    fn test_read_nonexistent() {
        let adapter = StdFsAdapter::new();
        let result = adapter.read_to_string(Path::new("/nonexistent/routes.toml"));

        assert!(matches!(result.unwrap_err(), FuelError::PathNotFound(_)));
    }

    #[test]
    fn test_exists_and_is_checks() {
        let temp_dir = TempDir::new().unwrap();
        let adapter = StdFsAdapter::new();
        let file_path = temp_dir.path().join("bootstrap.toml");

        assert!(!adapter.exists(&file_path));
        assert!(!adapter.is_file(&file_path));

        std::fs::write(&file_path, "").unwrap();

        assert!(adapter.exists(&file_path));
        assert!(adapter.is_file(&file_path));
        assert!(!adapter.is_dir(&file_path));
        assert!(adapter.is_dir(temp_dir.path()));
        assert!(!adapter.is_file(temp_dir.path()));
    }
}
