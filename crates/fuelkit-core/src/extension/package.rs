//! Package loading.
//!
//! Packages are shared libraries of classes living under the package root.
//! Loading one adds its directory to the resource finder, binds its
//! namespace and runs its `bootstrap.toml` when present.

use crate::adapters::Collaborators;
use crate::config::FuelConfig;
use crate::error::{FuelError, Result};
use crate::extension::module::CLASSES_DIR;
use crate::extension::registry::ExtensionRegistry;
use crate::extension::resolver::PathResolver;
use crate::extension::{ExtensionKind, LoadEntry, normalize_name};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Bootstrap manifest inside a package directory.
pub const BOOTSTRAP_FILE: &str = "bootstrap.toml";

/// Finder position packages are inserted at: behind the application path,
/// ahead of everything added later.
pub const FINDER_POSITION: usize = 1;

/// Loads, tracks and unloads packages.
#[derive(Debug)]
pub struct PackageManager {
    resolver: PathResolver,
    registry: ExtensionRegistry,
    collaborators: Collaborators,
}

impl PackageManager {
    /// Creates a manager resolving names under `config.package_root`.
    pub fn new(config: &FuelConfig, collaborators: Collaborators) -> Self {
        Self {
            resolver: PathResolver::new(
                ExtensionKind::Package,
                vec![config.package_root.clone()],
                collaborators.fs.clone(),
            )
            .with_base(config.app_root.clone()),
            registry: ExtensionRegistry::new(),
            collaborators,
        }
    }

    /// Loads one package. Returns `Ok(false)` if it is already loaded.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::NotFound` if the directory does not exist and
    /// bootstrap errors from the package manifest. A failed bootstrap
    /// withdraws the finder path and namespace again.
    pub fn load(&mut self, name: &str, path: Option<&Path>) -> Result<bool> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(FuelError::InvalidName(name.to_string()));
        }
        if self.registry.contains(&key) {
            tracing::debug!(package = %key, "package already loaded");
            return Ok(false);
        }

        let dir = self.resolver.resolve(name, path)?;
        let c = &self.collaborators;
        c.finder.add_path(&dir, Some(FINDER_POSITION));
        c.binder.add_namespace(&key, &dir.join(CLASSES_DIR));

        let bootstrap = dir.join(BOOTSTRAP_FILE);
        if c.fs.is_file(&bootstrap)
            && let Err(e) = c.bootstrapper.run(&key, &dir, &bootstrap, c.binder.as_ref())
        {
            c.finder.remove_path(&dir);
            c.binder.remove_namespace(&key);
            return Err(e);
        }

        tracing::info!(package = %key, path = %dir.display(), "package loaded");
        self.registry.insert(key, dir);
        Ok(true)
    }

    /// Loads every entry; `true` only if every load returned `true`.
    pub fn load_many<I, E>(&mut self, entries: I) -> Result<bool>
    where
        I: IntoIterator<Item = E>,
        E: Into<LoadEntry>,
    {
        let mut all = true;
        for entry in entries {
            let entry = entry.into();
            let loaded = self.load(&entry.name, entry.path.as_deref())?;
            all = all && loaded;
        }
        Ok(all)
    }

    /// Removes the package directory from the finder and forgets the
    /// package. Namespace and class bindings stay registered.
    pub fn unload(&mut self, name: &str) -> Result<()> {
        let key = normalize_name(name);
        if let Some(dir) = self.registry.remove(&key) {
            self.collaborators.finder.remove_path(&dir);
            tracing::info!(package = %key, "package unloaded");
        }
        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.registry.contains(&normalize_name(name))
    }

    pub fn is_unloaded(&self, name: &str) -> bool {
        !self.is_loaded(name)
    }

    /// Snapshot of every loaded package and its directory.
    pub fn loaded(&self) -> BTreeMap<String, PathBuf> {
        self.registry.snapshot()
    }

    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        self.registry
            .get(&normalize_name(name))
            .map(Path::to_path_buf)
    }

    /// Registered path when loaded, otherwise the package directory under
    /// the package root if it exists.
    pub fn exists(&self, name: &str) -> Option<PathBuf> {
        self.path_of(name).or_else(|| self.resolver.search(name))
    }
}
