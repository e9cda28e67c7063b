//! Extension registry: runtime loading of modules and packages.
//!
//! An extension is a directory of classes (and, for modules, routes) that
//! the application pulls in by name. Loading resolves the directory on the
//! configured search roots, binds the extension namespace, merges what the
//! extension contributes, and records `name -> path` in a registry owned by
//! the manager object.
//!
//! - [`resolver`]: search-root lookup
//! - [`registry`]: the name to path mapping
//! - [`routes`]: module route preparation
//! - [`module`] and [`package`]: the two managers

pub mod module;
pub mod package;
pub mod registry;
pub mod resolver;
pub mod routes;

pub use module::ModuleManager;
pub use package::PackageManager;
pub use registry::ExtensionRegistry;
pub use resolver::PathResolver;
pub use routes::RouteInjector;

use std::fmt;
use std::path::{Path, PathBuf};

/// What kind of extension a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    Module,
    Package,
}

impl ExtensionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionKind::Module => "module",
            ExtensionKind::Package => "package",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical registry key and namespace prefix for an extension name.
///
/// The name is trimmed, lowercased and its first character uppercased, so
/// `blog`, `BLOG` and ` Blog ` all become `Blog`. Applying it twice yields
/// the same value.
pub fn normalize_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Directory name an extension is looked up under.
pub fn dir_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Renders a directory with exactly one trailing separator.
pub fn display_dir(path: &Path) -> String {
    let mut rendered = path.display().to_string();
    while rendered.len() > 1 && rendered.ends_with(std::path::MAIN_SEPARATOR) {
        rendered.pop();
    }
    if !rendered.ends_with(std::path::MAIN_SEPARATOR) {
        rendered.push(std::path::MAIN_SEPARATOR);
    }
    rendered
}

/// One entry of a batch load: a name with an optional explicit directory.
///
/// Plain names and `(name, path)` pairs both convert into it, so a list of
/// names and a `name => path` map can be passed to the same `load_many`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadEntry {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl LoadEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn at(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }
}

impl From<&str> for LoadEntry {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for LoadEntry {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<(&str, &str)> for LoadEntry {
    fn from((name, path): (&str, &str)) -> Self {
        Self::at(name, path)
    }
}

impl From<(&str, &Path)> for LoadEntry {
    fn from((name, path): (&str, &Path)) -> Self {
        Self::at(name, path)
    }
}

impl From<(&str, PathBuf)> for LoadEntry {
    fn from((name, path): (&str, PathBuf)) -> Self {
        Self::at(name, path)
    }
}

impl From<(String, PathBuf)> for LoadEntry {
    fn from((name, path): (String, PathBuf)) -> Self {
        Self::at(name, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_variants() {
        assert_eq!(normalize_name("blog"), "Blog");
        assert_eq!(normalize_name("BLOG"), "Blog");
        assert_eq!(normalize_name("  blog "), "Blog");
        assert_eq!(normalize_name("user_admin"), "User_admin");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_normalize_name_is_idempotent() {
        for name in ["blog", "Blog", "bLoG", "ÉTÉ", "x", "  ", "auth_driver", "9lives"] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once, "not idempotent for {name:?}");
        }
    }

    #[test]
    fn test_dir_name_is_lowercase() {
        assert_eq!(dir_name(" Blog "), "blog");
    }

    #[test]
    fn test_display_dir_single_trailing_separator() {
        assert_eq!(display_dir(Path::new("/ext/blog")), "/ext/blog/");
        assert_eq!(display_dir(Path::new("/ext/blog/")), "/ext/blog/");
        assert_eq!(display_dir(Path::new("/ext/blog//")), "/ext/blog/");
        assert_eq!(display_dir(Path::new("/")), "/");
    }

    #[test]
    fn test_load_entry_conversions() {
        assert_eq!(LoadEntry::from("blog"), LoadEntry::named("blog"));
        assert_eq!(
            LoadEntry::from(("blog", "/ext/blog")),
            LoadEntry::at("blog", "/ext/blog")
        );
        assert_eq!(
            LoadEntry::from(("blog".to_string(), PathBuf::from("/x"))).path,
            Some(PathBuf::from("/x"))
        );
    }
}
