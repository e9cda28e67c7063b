//! Text formatter shims for fuelkit.
//!
//! Every formatting engine (Markdown, Textile, templates) sits behind the
//! [`TextFormatter`] trait so views can format text by engine name without
//! depending on a specific library. The crate ships a minijinja template
//! shim and a pulldown-cmark Markdown shim; other engines such as Textile
//! plug in through the same trait.
//!
//! # Examples
//!
//! ```
//! use fuelkit_format::{FormatterSet, MarkdownFormatter, TemplateFormatter};
//!
//! let mut formatters = FormatterSet::new();
//! formatters
//!     .register(TemplateFormatter::inline().with_global("site", "fuel"))
//!     .register(MarkdownFormatter::new());
//!
//! let html = formatters.parse("template", "Welcome to {{ site }}")?;
//! assert_eq!(html, "Welcome to fuel");
//! assert_eq!(formatters.parse("markdown", "*hi*")?, "<p><em>hi</em></p>\n");
//! # Ok::<(), fuelkit_format::FormatError>(())
//! ```

pub mod engine;
pub mod error;
pub mod markdown;
pub mod set;
pub mod template;

pub use engine::TextFormatter;
pub use error::{FormatError, Result};
pub use markdown::{MARKDOWN_ENGINE, MarkdownFormatter};
pub use set::{FormatterSet, TEXTILE_ENGINE};
pub use template::{TEMPLATE_ENGINE, TemplateFormatter};
