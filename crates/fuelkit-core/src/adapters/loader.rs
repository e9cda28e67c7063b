//! Config loader collaborator: reads a file as an ordered key/value table.

use crate::adapters::fs::FsAdapter;
use crate::error::{FuelError, Result};
use std::path::Path;
use std::sync::Arc;

/// Loads configuration files as ordered tables.
pub trait ConfigLoader: Send + Sync {
    /// Parses `path` into a table that keeps the file's key order.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::PathNotFound` if the file is missing and
    /// `FuelError::ConfigParseError` if it is not valid TOML.
    fn load_table(&self, path: &Path) -> Result<toml::Table>;
}

/// TOML loader reading through an [`FsAdapter`].
pub struct TomlConfigLoader {
    fs: Arc<dyn FsAdapter>,
}

impl TomlConfigLoader {
    pub fn new(fs: Arc<dyn FsAdapter>) -> Self {
        Self { fs }
    }
}

impl std::fmt::Debug for TomlConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TomlConfigLoader")
            .field("fs", &"Arc<dyn FsAdapter>")
            .finish()
    }
}

impl ConfigLoader for TomlConfigLoader {
    fn load_table(&self, path: &Path) -> Result<toml::Table> {
        let content = self.fs.read_to_string(path)?;
        content
            .parse::<toml::Table>()
            .map_err(|e| FuelError::ConfigParseError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fs_mock::MockFsAdapter;

    #[test]
    fn test_table_keeps_file_order() {
        let fs = MockFsAdapter::new();
        fs.add_file(
            "/m/config/routes.toml",
            "zeta = \"z/index\"\nalpha = \"a/index\"\nmid = \"m/index\"\n",
        );
        let loader = TomlConfigLoader::new(Arc::new(fs));

        let table = loader.load_table(Path::new("/m/config/routes.toml")).unwrap();
        let keys: Vec<&str> = table.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_invalid_toml_fails() {
        let fs = MockFsAdapter::new();
        fs.add_file("/broken.toml", "invalid { toml");
        let loader = TomlConfigLoader::new(Arc::new(fs));

        let result = loader.load_table(Path::new("/broken.toml"));
        assert!(matches!(result.unwrap_err(), FuelError::ConfigParseError(_)));
    }
}
