//! Module loading.
//!
//! Modules are application-level extensions: each lives in its own
//! directory under one of the configured module paths and can contribute
//! routes through `config/routes.toml`.

use crate::adapters::Collaborators;
use crate::adapters::router::Route;
use crate::config::FuelConfig;
use crate::error::{FuelError, Result};
use crate::extension::registry::ExtensionRegistry;
use crate::extension::resolver::PathResolver;
use crate::extension::routes::{ROUTES_FILE, RouteInjector};
use crate::extension::{ExtensionKind, LoadEntry, normalize_name};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Sub-directory of an extension bound to its namespace.
pub const CLASSES_DIR: &str = "classes";

/// Loads, tracks and unloads modules.
///
/// # Examples
///
/// ```no_run
/// use fuelkit_core::adapters::Collaborators;
/// use fuelkit_core::{FuelConfig, ModuleManager};
/// use std::path::PathBuf;
///
/// # fn main() -> fuelkit_core::Result<()> {
/// let config = FuelConfig::new(PathBuf::from("/srv/app"));
/// let mut modules = ModuleManager::new(&config, Collaborators::standard(vec![]));
///
/// assert!(modules.load("blog", None)?);
/// assert!(!modules.load("blog", None)?);
/// assert!(modules.is_loaded("Blog"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ModuleManager {
    resolver: PathResolver,
    registry: ExtensionRegistry,
    collaborators: Collaborators,
    module_routes: bool,
    /// Loaded modules whose routes were merged into the router.
    routed: BTreeSet<String>,
}

impl ModuleManager {
    /// Creates a manager searching `config.module_paths` in order.
    pub fn new(config: &FuelConfig, collaborators: Collaborators) -> Self {
        Self {
            resolver: PathResolver::new(
                ExtensionKind::Module,
                config.module_paths.clone(),
                collaborators.fs.clone(),
            )
            .with_base(config.app_root.clone()),
            registry: ExtensionRegistry::new(),
            module_routes: config.routing.module_routes,
            routed: BTreeSet::new(),
            collaborators,
        }
    }

    /// Loads one module.
    ///
    /// Returns `Ok(false)` without touching anything if the module is
    /// already loaded. Otherwise the directory is resolved, `<Name>` is
    /// bound to `<dir>/classes`, the module routes are merged ahead of the
    /// existing ones when route merging is enabled, and the module is
    /// recorded.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::NotFound` if no directory can be resolved, or a
    /// route file error. The registry is unchanged on error.
    pub fn load(&mut self, name: &str, path: Option<&Path>) -> Result<bool> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(FuelError::InvalidName(name.to_string()));
        }
        if self.registry.contains(&key) {
            tracing::debug!(module = %key, "module already loaded");
            return Ok(false);
        }

        let dir = self.resolver.resolve(name, path)?;
        let routes = if self.module_routes {
            self.module_routes_of(&key, &dir)?
        } else {
            Vec::new()
        };

        self.collaborators
            .binder
            .add_namespace(&key, &dir.join(CLASSES_DIR));
        if !routes.is_empty() {
            tracing::debug!(module = %key, count = routes.len(), "merging module routes");
            self.collaborators.router.add(routes, true);
            self.routed.insert(key.clone());
        }

        tracing::info!(module = %key, path = %dir.display(), "module loaded");
        self.registry.insert(key, dir);
        Ok(true)
    }

    /// Loads every entry and returns `true` only if each load returned
    /// `true`. Entries after an already-loaded one are still loaded; the
    /// first error stops the batch.
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

    /// Unloads a module.
    ///
    /// If the module merged routes when it was loaded, the names computed
    /// from its route file are deleted from the router. The registry entry
    /// is removed; the namespace binding is left in place. Unloading a
    /// module that was never loaded is a no-op.
    pub fn unload(&mut self, name: &str) -> Result<()> {
        let key = normalize_name(name);
        let Some(dir) = self.registry.get(&key).map(Path::to_path_buf) else {
            tracing::debug!(module = %key, "unload of module that is not loaded");
            return Ok(());
        };

        let file = dir.join(ROUTES_FILE);
        if self.routed.remove(&key) && self.collaborators.fs.is_file(&file) {
            match self.collaborators.config_loader.load_table(&file) {
                Ok(table) => {
                    let names = RouteInjector::route_names(&key, &table);
                    let removed = self.collaborators.router.delete(&names);
                    tracing::debug!(module = %key, removed, "module routes deleted");
                }
                Err(e) => {
                    tracing::warn!(module = %key, error = %e, "could not read module routes on unload");
                }
            }
        }

        self.registry.remove(&key);
        tracing::info!(module = %key, "module unloaded");
        Ok(())
    }

    /// Whether `name` is loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.registry.contains(&normalize_name(name))
    }

    /// Whether `name` is not loaded.
    pub fn is_unloaded(&self, name: &str) -> bool {
        !self.is_loaded(name)
    }

    /// Snapshot of every loaded module and its directory.
    pub fn loaded(&self) -> BTreeMap<String, PathBuf> {
        self.registry.snapshot()
    }

    /// Directory `name` was loaded from.
    pub fn path_of(&self, name: &str) -> Option<PathBuf> {
        self.registry
            .get(&normalize_name(name))
            .map(Path::to_path_buf)
    }

    /// Where `name` lives: its registered path when loaded, otherwise the
    /// first matching directory on the module paths. Never loads anything.
    pub fn exists(&self, name: &str) -> Option<PathBuf> {
        self.path_of(name).or_else(|| self.resolver.search(name))
    }

    /// Routes `name` would contribute from `dir`, empty if it has no route file.
    fn module_routes_of(&self, name: &str, dir: &Path) -> Result<Vec<Route>> {
        let file = dir.join(ROUTES_FILE);
        if !self.collaborators.fs.is_file(&file) {
            return Ok(Vec::new());
        }
        let table = self.collaborators.config_loader.load_table(&file)?;
        RouteInjector::prepare(name, &table, &file)
    }

    /// Collaborators this manager mutates.
    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }
}
