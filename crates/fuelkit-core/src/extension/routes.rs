//! Module route preparation.
//!
//! A module ships `config/routes.toml`, an ordered table of routes written
//! relative to the module:
//!
//! ```toml
//! _root_ = "blog/index"
//! about = "blog/about"
//! "archive/(:num)" = { target = "blog/archive/$1", verb = "GET" }
//! ```
//!
//! Before merging, names and paths are moved under the module prefix.
//! `_root_` becomes the module itself, `_404_` is left alone, and entries
//! already under the prefix are kept as written.

use crate::adapters::router::Route;
use crate::error::{FuelError, Result};
use crate::extension::dir_name;
use std::path::Path;

/// Route file inside a module directory.
pub const ROUTES_FILE: &str = "config/routes.toml";

const ROOT_ROUTE: &str = "_root_";
const NOT_FOUND_ROUTE: &str = "_404_";

/// Computes the routes a module contributes to the router.
pub struct RouteInjector;

impl RouteInjector {
    /// Rewrites one route name or path into the module namespace.
    pub fn prefixed(module: &str, name: &str) -> String {
        let prefix = dir_name(module);
        let name = name.trim_matches('/');
        if name == ROOT_ROUTE || name.is_empty() {
            prefix
        } else if name == NOT_FOUND_ROUTE
            || name == prefix
            || name.starts_with(&format!("{prefix}/"))
        {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        }
    }

    /// Names the routes of `table` occupy once merged, in file order.
    pub fn route_names(module: &str, table: &toml::Table) -> Vec<String> {
        table
            .keys()
            .map(|name| Self::prefixed(module, name))
            .collect()
    }

    /// Builds the routes to merge for `module` from its route table.
    ///
    /// # Errors
    ///
    /// Returns `FuelError::InvalidRoute` for entries that are neither a
    /// target string nor a table with a string `target`.
    pub fn prepare(module: &str, table: &toml::Table, file: &Path) -> Result<Vec<Route>> {
        table
            .iter()
            .map(|(name, value)| Self::prepare_one(module, name, value, file))
            .collect()
    }

    fn prepare_one(module: &str, name: &str, value: &toml::Value, file: &Path) -> Result<Route> {
        let invalid = |reason: &str| FuelError::InvalidRoute {
            file: file.to_path_buf(),
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let route_name = Self::prefixed(module, name);
        match value {
            toml::Value::String(target) => Ok(Route::new(route_name, target.clone())),
            toml::Value::Table(entry) => {
                let target = entry
                    .get("target")
                    .and_then(toml::Value::as_str)
                    .ok_or_else(|| invalid("missing string `target`"))?;
                let path = match entry.get("path") {
                    Some(value) => {
                        let path = value
                            .as_str()
                            .ok_or_else(|| invalid("`path` must be a string"))?;
                        Self::prefixed(module, path)
                    }
                    None => route_name.clone(),
                };
                let verb = match entry.get("verb") {
                    Some(value) => Some(
                        value
                            .as_str()
                            .ok_or_else(|| invalid("`verb` must be a string"))?
                            .to_uppercase(),
                    ),
                    None => None,
                };
                Ok(Route {
                    name: route_name,
                    path,
                    target: target.to_string(),
                    verb,
                })
            }
            _ => Err(invalid("expected a target string or a route table")),
        }
    }
}
