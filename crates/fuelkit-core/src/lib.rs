//! fuelkit core - base pieces for a FuelPHP-style web application.
//!
//! The centre of the crate is the extension registry: modules and packages
//! are loaded by name at runtime, resolved on configured search roots, and
//! wired into the autoloader, router and resource finder collaborators.
//! Around it sit the smaller helpers an application is built from.
//!
//! # Architecture
//!
//! - [`error`]: error type and result alias
//! - [`config`]: `fuelkit.toml` configuration
//! - [`adapters`]: collaborator traits with in-process implementations
//! - [`extension`]: module/package managers and their registry
//! - [`http`], [`controller`]: request/response values and the controller base
//! - [`model`]: model base, convention finders and query descriptions
//! - [`cookie`], [`event`]: request helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use fuelkit_core::adapters::Collaborators;
//! use fuelkit_core::{FuelConfig, ModuleManager};
//!
//! let config = FuelConfig::load(app_root)?;
//! let mut modules = ModuleManager::new(&config, Collaborators::standard(vec![]));
//! modules.load_many(["blog", "shop"])?;
//! assert!(modules.is_loaded("blog"));
//! ```

pub mod adapters;
pub mod config;
pub mod controller;
pub mod cookie;
pub mod error;
pub mod event;
pub mod extension;
pub mod http;
pub mod model;

pub use config::{CookieConfig, FuelConfig, RoutingConfig};
pub use controller::{Controller, dispatch};
pub use cookie::CookieJar;
pub use error::{FuelError, Result};
pub use event::{EventBus, ReturnType, Triggered};
pub use extension::{ExtensionKind, LoadEntry, ModuleManager, PackageManager, normalize_name};
pub use http::{HttpException, Request, Response};
pub use model::{Crud, FinderCall, Model, Query, QueryExecutor};
