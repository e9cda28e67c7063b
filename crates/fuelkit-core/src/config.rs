//! Configuration types for the fuelkit runtime.
//!
//! The configuration lives in `fuelkit.toml` at the application root. Every
//! key is optional; missing keys keep the defaults from [`FuelConfig::new`].

use crate::error::{FuelError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up under the application root.
pub const CONFIG_FILE: &str = "fuelkit.toml";

/// Main fuelkit configuration.
#[derive(Debug, Clone)]
pub struct FuelConfig {
    /// Application root directory. Relative paths in the file resolve here.
    pub app_root: PathBuf,

    /// Ordered module search roots. First directory match wins.
    pub module_paths: Vec<PathBuf>,

    /// Single root directory packages are resolved under.
    pub package_root: PathBuf,

    /// Routing behaviour for loaded modules.
    pub routing: RoutingConfig,

    /// Defaults applied to cookies written through the cookie helper.
    pub cookie: CookieConfig,
}

impl FuelConfig {
    /// Creates a configuration with defaults derived from `app_root`.
    ///
    /// Modules are searched in `<app_root>/modules`, packages live in
    /// `<app_root>/packages`, module routes are not merged.
    pub fn new(app_root: PathBuf) -> Self {
        Self {
            module_paths: vec![app_root.join("modules")],
            package_root: app_root.join("packages"),
            app_root,
            routing: RoutingConfig::default(),
            cookie: CookieConfig::default(),
        }
    }

    /// Loads `<app_root>/fuelkit.toml`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::ConfigParseError` if the file is not valid TOML or
    /// has values of the wrong type, and `FuelError::Io` if it cannot be read.
    pub fn load(app_root: PathBuf) -> Result<Self> {
        let file = app_root.join(CONFIG_FILE);
        if !file.is_file() {
            tracing::debug!(path = %file.display(), "no config file, using defaults");
            return Ok(Self::new(app_root));
        }
        Self::load_file(app_root, &file)
    }

    /// Loads an explicit configuration file on top of defaults for `app_root`.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::ConfigNotFound` if `file` does not exist.
    pub fn load_file(app_root: PathBuf, file: &Path) -> Result<Self> {
        if !file.is_file() {
            return Err(FuelError::ConfigNotFound(file.to_path_buf()));
        }
        let content = std::fs::read_to_string(file)?;
        let raw: RawConfig = toml::from_str(&content)
            .map_err(|e| FuelError::ConfigParseError(format!("{}: {}", file.display(), e)))?;

        let mut config = Self::new(app_root);
        config.apply(raw);
        Ok(config)
    }

    fn apply(&mut self, raw: RawConfig) {
        if let Some(paths) = raw.module_paths {
            self.module_paths = paths.into_iter().map(|p| self.resolve(p)).collect();
        }
        if let Some(root) = raw.package_root {
            self.package_root = self.resolve(root);
        }
        if let Some(routing) = raw.routing {
            self.routing = routing;
        }
        if let Some(cookie) = raw.cookie {
            self.cookie = cookie;
        }
    }

    fn resolve(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.app_root.join(path)
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Whether `config/routes.toml` of a loaded module is merged into the router.
    pub module_routes: bool,
}

/// Cookie defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Lifetime in seconds; `0` writes a session cookie.
    pub expiration: i64,

    /// Path attribute.
    pub path: String,

    /// Domain attribute, omitted when unset.
    pub domain: Option<String>,

    /// Only transmit over HTTPS.
    pub secure: bool,

    /// Hide the cookie from client-side scripts.
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            expiration: 0,
            path: "/".to_string(),
            domain: None,
            secure: false,
            http_only: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    module_paths: Option<Vec<PathBuf>>,
    package_root: Option<PathBuf>,
    routing: Option<RoutingConfig>,
    cookie: Option<CookieConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_derive_from_root() {
        let config = FuelConfig::new(PathBuf::from("/app"));
        assert_eq!(config.module_paths, vec![PathBuf::from("/app/modules")]);
        assert_eq!(config.package_root, PathBuf::from("/app/packages"));
        assert!(!config.routing.module_routes);
        assert_eq!(config.cookie.path, "/");
        assert_eq!(config.cookie.expiration, 0);
    }

    #[test]
    fn test_relative_paths_resolve_against_root() {
        let mut config = FuelConfig::new(PathBuf::from("/app"));
        let raw: RawConfig = toml::from_str(
            r#"
module_paths = ["mods", "/opt/shared/modules"]
package_root = "vendor/pkgs"
"#,
        )
        .unwrap();
        config.apply(raw);

        assert_eq!(
            config.module_paths,
            vec![
                PathBuf::from("/app/mods"),
                PathBuf::from("/opt/shared/modules")
            ]
        );
        assert_eq!(config.package_root, PathBuf::from("/app/vendor/pkgs"));
    }

    #[test]
    fn test_partial_cookie_section_keeps_defaults() {
        let mut config = FuelConfig::new(PathBuf::from("/app"));
        let raw: RawConfig = toml::from_str("[cookie]\nsecure = true\n").unwrap();
        config.apply(raw);

        assert!(config.cookie.secure);
        assert_eq!(config.cookie.path, "/");
        assert!(config.cookie.domain.is_none());
    }
}
