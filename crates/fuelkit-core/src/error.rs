//! Error types for fuelkit operations.
//!
//! This module defines every error variant the registry, collaborators and
//! helper layers can surface. All errors use `thiserror`; none of them are
//! recovered locally, they propagate to the caller.

use crate::extension::ExtensionKind;
use crate::http::HttpException;
use std::path::PathBuf;
use thiserror::Error;

/// Comprehensive error type for fuelkit operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FuelError {
    // Extension errors
    /// Extension directory could not be resolved on any search root.
    #[error("{kind} could not be found: {name}")]
    NotFound {
        /// Whether a module or a package was requested.
        kind: ExtensionKind,
        /// Name as passed by the caller.
        name: String,
    },

    /// Extension name is empty after normalization.
    #[error("invalid extension name: {0:?}")]
    InvalidName(String),

    /// A module route file exists but could not be interpreted.
    #[error("invalid route definition `{name}` in {file}: {reason}")]
    InvalidRoute {
        /// File the route was read from.
        file: PathBuf,
        /// Route name as written in the file.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A package bootstrap file could not be applied.
    #[error("bootstrap failed for {0}: {1}")]
    BootstrapFailed(String, String),

    // Model errors
    /// Undefined dynamic accessor on the model base.
    #[error("call to undefined method {0}")]
    BadMethodCall(String),

    /// An expected-singular query yielded zero rows.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Model row could not be mapped onto the model type.
    #[error("row mapping failed: {0}")]
    RowMapping(#[from] serde_json::Error),

    // HTTP errors
    /// HTTP-level failure raised while dispatching a controller.
    #[error(transparent)]
    Http(#[from] HttpException),

    // File system errors
    /// Path not found in the file system.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// Error reading file.
    #[error("file read error: {0}")]
    FileReadError(String),

    // Config errors
    /// Error parsing a configuration file.
    #[error("config parse error: {0}")]
    ConfigParseError(String),

    /// Configuration file not found at the expected location.
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Standard IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error with context from a collaborator implemented with anyhow.
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl FuelError {
    /// Shorthand for [`FuelError::NotFound`].
    pub fn not_found(kind: ExtensionKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}

/// Result type alias for fuelkit operations.
pub type Result<T> = std::result::Result<T, FuelError>;
