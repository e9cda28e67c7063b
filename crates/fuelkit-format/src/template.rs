//! Template engine shim over minijinja.

use crate::engine::TextFormatter;
use crate::error::{FormatError, Result};
use minijinja::{Environment, Error, ErrorKind};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Engine name [`TemplateFormatter`] registers under.
pub const TEMPLATE_ENGINE: &str = "template";

/// File extension of named templates.
pub const TEMPLATE_EXTENSION: &str = "j2";

/// Renders minijinja templates.
///
/// Named templates are looked up as `<name>.j2` across an ordered list of
/// directories, typically the resource finder's search paths, and the first
/// directory holding the file wins. Inline text passed to
/// [`TextFormatter::parse`] is rendered with the configured globals only.
#[derive(Debug)]
pub struct TemplateFormatter {
    /// Directories searched for named templates, highest priority first.
    pub template_dirs: Vec<PathBuf>,
    env: Environment<'static>,
}

impl TemplateFormatter {
    /// Creates a formatter searching `template_dirs` in order.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::TemplateDirectoryNotFound` if any directory is
    /// missing.
    pub fn new(template_dirs: Vec<PathBuf>) -> Result<Self> {
        if let Some(missing) = template_dirs.iter().find(|dir| !dir.is_dir()) {
            return Err(FormatError::TemplateDirectoryNotFound(missing.clone()));
        }

        let mut env = Environment::new();
        let dirs = template_dirs.clone();
        env.set_loader(move |name| {
            if name.split(['/', '\\']).any(|segment| segment == "..") {
                return Ok(None);
            }
            for dir in &dirs {
                let path = dir.join(name);
                if path.is_file() {
                    return std::fs::read_to_string(&path).map(Some).map_err(|e| {
                        Error::new(
                            ErrorKind::InvalidOperation,
                            format!("could not read template {}", path.display()),
                        )
                        .with_source(e)
                    });
                }
            }
            Ok(None)
        });

        Ok(Self { template_dirs, env })
    }

    /// Creates a formatter without template directories; only inline text
    /// can be rendered.
    pub fn inline() -> Self {
        Self {
            template_dirs: Vec::new(),
            env: Environment::new(),
        }
    }

    /// Makes `value` available to every render as `name`.
    pub fn with_global(mut self, name: &str, value: impl Serialize) -> Self {
        self.env.add_global(
            name.to_string(),
            minijinja::Value::from_serialize(&value),
        );
        self
    }

    /// Renders the named template with `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::TemplateNotFound` if no directory holds
    /// `<name>.j2`, `FormatError::TemplateRenderError` if rendering fails.
    pub fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<String> {
        let template_name = format!("{name}.{TEMPLATE_EXTENSION}");
        let tmpl = self
            .env
            .get_template(&template_name)
            .map_err(|e| FormatError::TemplateNotFound(format!("{name}: {e}")))?;
        tmpl.render(ctx)
            .map_err(|e| FormatError::TemplateRenderError(format!("{name}: {e}")))
    }

    /// Renders template source `text` with `ctx`.
    pub fn render_str<T: Serialize>(&self, text: &str, ctx: &T) -> Result<String> {
        self.env
            .render_str(text, ctx)
            .map_err(|e| FormatError::TemplateRenderError(e.to_string()))
    }

    /// Names of every template reachable through the directories, sorted.
    /// A name shadowed by an earlier directory is listed once.
    pub fn list_templates(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for dir in &self.template_dirs {
            let entries = std::fs::read_dir(dir).map_err(|source| FormatError::TemplateListError {
                path: dir.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| FormatError::TemplateListError {
                    path: dir.clone(),
                    source,
                })?;
                let path = entry.path();
                if path.is_file()
                    && let Some(ext) = path.extension()
                    && ext == TEMPLATE_EXTENSION
                    && let Some(name) = path.file_stem().and_then(|n| n.to_str())
                {
                    names.insert(name.to_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }
}

impl TextFormatter for TemplateFormatter {
    fn name(&self) -> &str {
        TEMPLATE_ENGINE
    }

    fn parse(&self, text: &str) -> Result<String> {
        self.render_str(text, &minijinja::context! {})
    }
}
