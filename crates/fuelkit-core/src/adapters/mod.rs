//! Collaborator adapters consumed by the extension registry.
//!
//! Each collaborator is a trait with an in-process implementation; the
//! host application can swap any of them for its own service.

pub mod autoloader;
pub mod bootstrap;
pub mod finder;
pub mod fs;
pub mod fs_impl;
pub mod fs_mock;
pub mod loader;
pub mod router;

use std::path::PathBuf;
use std::sync::Arc;

/// Shared handles to every collaborator the registry talks to.
///
/// Cloning is cheap; module and package managers built from clones of the
/// same value observe each other's namespace, route and finder mutations.
#[derive(Clone)]
pub struct Collaborators {
    /// File system probes and reads.
    pub fs: Arc<dyn fs::FsAdapter>,

    /// Autoloader namespace table.
    pub binder: Arc<dyn autoloader::NamespaceBinder>,

    /// Route table.
    pub router: Arc<dyn router::Router>,

    /// Resource search paths.
    pub finder: Arc<dyn finder::Finder>,

    /// Loader for route files and bootstrap manifests.
    pub config_loader: Arc<dyn loader::ConfigLoader>,

    /// Package bootstrap runner.
    pub bootstrapper: Arc<dyn bootstrap::Bootstrapper>,
}

impl Collaborators {
    /// Builds the in-process collaborators over the real file system.
    ///
    /// `finder_paths` seeds the resource finder, highest priority first.
    pub fn standard(finder_paths: Vec<PathBuf>) -> Self {
        Self::with_fs(Arc::new(fs_impl::StdFsAdapter::new()), finder_paths)
    }

    /// Builds the in-process collaborators over a given file system adapter.
    pub fn with_fs(fs: Arc<dyn fs::FsAdapter>, finder_paths: Vec<PathBuf>) -> Self {
        let config_loader: Arc<dyn loader::ConfigLoader> =
            Arc::new(loader::TomlConfigLoader::new(fs.clone()));
        Self {
            binder: Arc::new(autoloader::NamespaceMap::new()),
            router: Arc::new(router::RouteTable::new()),
            finder: Arc::new(finder::SearchPaths::new(fs.clone(), finder_paths)),
            bootstrapper: Arc::new(bootstrap::ManifestBootstrapper::new(config_loader.clone())),
            config_loader,
            fs,
        }
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("fs", &"Arc<dyn FsAdapter>")
            .field("binder", &"Arc<dyn NamespaceBinder>")
            .field("router", &"Arc<dyn Router>")
            .field("finder", &"Arc<dyn Finder>")
            .field("config_loader", &"Arc<dyn ConfigLoader>")
            .field("bootstrapper", &"Arc<dyn Bootstrapper>")
            .finish()
    }
}
