//! Package bootstrap collaborator.
//!
//! A package may ship a `bootstrap.toml` next to its sources. Running it
//! declares class files and extra namespaces before the package is used:
//!
//! ```toml
//! [classes]
//! "Auth\\Auth" = "classes/auth.php"
//!
//! [namespaces]
//! "Auth\\Driver" = "classes/driver"
//! ```

use crate::adapters::autoloader::NamespaceBinder;
use crate::adapters::loader::ConfigLoader;
use crate::error::{FuelError, Result};
use std::path::Path;
use std::sync::Arc;

/// Runs a package bootstrap file.
pub trait Bootstrapper: Send + Sync {
    /// Applies `file` for `package`, whose directory is `package_dir`.
    fn run(
        &self,
        package: &str,
        package_dir: &Path,
        file: &Path,
        binder: &dyn NamespaceBinder,
    ) -> Result<()>;
}

/// Bootstrapper that interprets the declarative `bootstrap.toml` manifest.
pub struct ManifestBootstrapper {
    loader: Arc<dyn ConfigLoader>,
}

impl ManifestBootstrapper {
    pub fn new(loader: Arc<dyn ConfigLoader>) -> Self {
        Self { loader }
    }
}

impl std::fmt::Debug for ManifestBootstrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestBootstrapper")
            .field("loader", &"Arc<dyn ConfigLoader>")
            .finish()
    }
}

fn relative_entries<'a>(
    package: &str,
    table: &'a toml::Table,
    section: &str,
) -> Result<Vec<(&'a str, &'a str)>> {
    let Some(value) = table.get(section) else {
        return Ok(Vec::new());
    };
    let entries = value.as_table().ok_or_else(|| {
        FuelError::BootstrapFailed(package.to_string(), format!("[{section}] must be a table"))
    })?;

    entries
        .iter()
        .map(|(key, value)| {
            value
                .as_str()
                .map(|rel| (key.as_str(), rel))
                .ok_or_else(|| {
                    FuelError::BootstrapFailed(
                        package.to_string(),
                        format!("{section}.{key} must be a string path"),
                    )
                })
        })
        .collect()
}

impl Bootstrapper for ManifestBootstrapper {
    fn run(
        &self,
        package: &str,
        package_dir: &Path,
        file: &Path,
        binder: &dyn NamespaceBinder,
    ) -> Result<()> {
        let table = self.loader.load_table(file)?;

        let classes = relative_entries(package, &table, "classes")?;
        let namespaces = relative_entries(package, &table, "namespaces")?;

        for (class, rel) in &classes {
            binder.add_class(class, &package_dir.join(rel));
        }
        for (prefix, rel) in &namespaces {
            binder.add_namespace(prefix, &package_dir.join(rel));
        }

        tracing::debug!(
            package,
            classes = classes.len(),
            namespaces = namespaces.len(),
            "package bootstrap applied"
        );
        Ok(())
    }
}
