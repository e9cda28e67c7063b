//! Error types for the formatter crate.

use std::path::PathBuf;

/// Errors that can occur while formatting text.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// No formatter is registered under the requested engine name.
    #[error("no formatter registered for engine: {0}")]
    EngineNotRegistered(String),

    /// Named template was not found on any template directory.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Error occurred while rendering a template.
    #[error("template render error: {0}")]
    TemplateRenderError(String),

    /// Template directory does not exist or is not a directory.
    #[error("template directory not found: {0}")]
    TemplateDirectoryNotFound(PathBuf),

    /// Template directory listing failed.
    #[error("failed to list templates in {path}")]
    TemplateListError {
        /// Path to the template directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failure reported by an external formatting engine.
    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}

/// Result type alias for formatter operations.
pub type Result<T> = std::result::Result<T, FormatError>;
