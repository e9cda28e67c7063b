//! File system adapter trait.
//!
//! The registry only ever needs read access: directory probes for path
//! resolution and file reads for route tables and package bootstraps.

use crate::error::Result;
use std::path::Path;

/// File system adapter trait.
///
/// Implementations can be real (using `std::fs`) or in-memory for tests.
pub trait FsAdapter: Send + Sync {
    /// Reads the contents of a file as a string.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::PathNotFound` if the file doesn't exist,
    /// `FuelError::FileReadError` if reading fails.
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Checks if a path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Checks if a path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Checks if a path exists and is a file.
    fn is_file(&self, path: &Path) -> bool;
}
