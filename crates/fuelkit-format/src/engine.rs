//! Formatter trait implemented by every text engine shim.

use crate::error::Result;

/// A text formatting engine such as Markdown, Textile or a template language.
///
/// Shims around third-party engines implement this trait and are collected
/// in a [`FormatterSet`](crate::FormatterSet).
///
/// # Examples
///
/// ```
/// use fuelkit_format::{Result, TextFormatter};
///
/// struct Shout;
///
/// impl TextFormatter for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn parse(&self, text: &str) -> Result<String> {
///         Ok(text.to_uppercase())
///     }
/// }
///
/// assert_eq!(Shout.parse("hi").unwrap(), "HI");
/// ```
pub trait TextFormatter: Send + Sync {
    /// Engine name the formatter is registered under (e.g. `markdown`).
    fn name(&self) -> &str;

    /// Converts `text` into the engine's output format.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the input.
    fn parse(&self, text: &str) -> Result<String>;
}
