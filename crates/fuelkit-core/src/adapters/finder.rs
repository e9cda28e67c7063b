//! Resource finder collaborator: prioritized search paths.

use crate::adapters::fs::FsAdapter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Ordered list of directories searched for resources (views, config, ...).
pub trait Finder: Send + Sync {
    /// Inserts `path` at index `position`, or appends when `None`.
    /// Positions past the end append. Re-adding a path moves it.
    fn add_path(&self, path: &Path, position: Option<usize>);

    /// Removes `path`. Returns `true` if it was present.
    fn remove_path(&self, path: &Path) -> bool;

    /// Snapshot of the search paths in priority order.
    fn paths(&self) -> Vec<PathBuf>;

    /// First search path under which `relative` is a file.
    fn locate(&self, relative: &Path) -> Option<PathBuf>;
}

/// In-process finder probing files through an [`FsAdapter`].
pub struct SearchPaths {
    fs: Arc<dyn FsAdapter>,
    paths: Mutex<Vec<PathBuf>>,
}

impl SearchPaths {
    /// Creates a finder seeded with `initial` paths.
    pub fn new(fs: Arc<dyn FsAdapter>, initial: Vec<PathBuf>) -> Self {
        Self {
            fs,
            paths: Mutex::new(initial),
        }
    }
}

impl std::fmt::Debug for SearchPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPaths")
            .field("fs", &"Arc<dyn FsAdapter>")
            .field("paths", &self.paths())
            .finish()
    }
}

impl Finder for SearchPaths {
    fn add_path(&self, path: &Path, position: Option<usize>) {
        let mut paths = self.paths.lock().unwrap();
        paths.retain(|p| p != path);
        match position {
            Some(index) if index < paths.len() => paths.insert(index, path.to_path_buf()),
            _ => paths.push(path.to_path_buf()),
        }
    }

    fn remove_path(&self, path: &Path) -> bool {
        let mut paths = self.paths.lock().unwrap();
        let before = paths.len();
        paths.retain(|p| p != path);
        before != paths.len()
    }

    fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().unwrap().clone()
    }

    fn locate(&self, relative: &Path) -> Option<PathBuf> {
        self.paths()
            .into_iter()
            .map(|dir| dir.join(relative))
            .find(|candidate| self.fs.is_file(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fs_mock::MockFsAdapter;

    #[test]
    fn test_positional_insert() {
        let finder = SearchPaths::new(
            Arc::new(MockFsAdapter::new()),
            vec![PathBuf::from("/app"), PathBuf::from("/core")],
        );
        finder.add_path(Path::new("/pkgs/auth"), Some(1));
        finder.add_path(Path::new("/late"), Some(99));

        assert_eq!(
            finder.paths(),
            vec![
                PathBuf::from("/app"),
                PathBuf::from("/pkgs/auth"),
                PathBuf::from("/core"),
                PathBuf::from("/late"),
            ]
        );
    }

    #[test]
    fn test_readd_moves_path() {
        let finder = SearchPaths::new(
            Arc::new(MockFsAdapter::new()),
            vec![PathBuf::from("/a"), PathBuf::from("/b")],
        );
        finder.add_path(Path::new("/b"), Some(0));

        assert_eq!(finder.paths(), vec![PathBuf::from("/b"), PathBuf::from("/a")]);
        assert!(finder.remove_path(Path::new("/b")));
        assert!(!finder.remove_path(Path::new("/b")));
    }

    #[test]
    fn test_locate_first_match_wins() {
        let fs = MockFsAdapter::new();
        fs.add_file("/pkgs/auth/views/login.j2", "pkg");
        fs.add_file("/core/views/login.j2", "core");

        let finder = SearchPaths::new(
            Arc::new(fs),
            vec![PathBuf::from("/app"), PathBuf::from("/pkgs/auth"), PathBuf::from("/core")],
        );

        assert_eq!(
            finder.locate(Path::new("views/login.j2")),
            Some(PathBuf::from("/pkgs/auth/views/login.j2"))
        );
        assert!(finder.locate(Path::new("views/missing.j2")).is_none());
    }
}
