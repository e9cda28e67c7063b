//! Named collection of formatters.

use crate::engine::TextFormatter;
use crate::error::{FormatError, Result};
use std::collections::BTreeMap;

/// Engine name conventionally used for a Textile shim.
pub const TEXTILE_ENGINE: &str = "textile";

/// Formatters keyed by engine name.
#[derive(Default)]
pub struct FormatterSet {
    formatters: BTreeMap<String, Box<dyn TextFormatter>>,
}

impl FormatterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `formatter` under its own name, replacing any previous one.
    pub fn register(&mut self, formatter: impl TextFormatter + 'static) -> &mut Self {
        self.formatters
            .insert(formatter.name().to_lowercase(), Box::new(formatter));
        self
    }

    pub fn has(&self, engine: &str) -> bool {
        self.formatters.contains_key(&engine.to_lowercase())
    }

    /// Registered engine names, sorted.
    pub fn engines(&self) -> Vec<&str> {
        self.formatters.keys().map(String::as_str).collect()
    }

    /// Formats `text` with `engine`.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::EngineNotRegistered` for unknown engines and
    /// whatever the engine itself reports.
    pub fn parse(&self, engine: &str, text: &str) -> Result<String> {
        let formatter = self
            .formatters
            .get(&engine.to_lowercase())
            .ok_or_else(|| FormatError::EngineNotRegistered(engine.to_string()))?;
        formatter.parse(text)
    }
}

impl std::fmt::Debug for FormatterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatterSet")
            .field("engines", &self.engines())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MARKDOWN_ENGINE;

    struct Emphasis;

    impl TextFormatter for Emphasis {
        fn name(&self) -> &str {
            MARKDOWN_ENGINE
        }

        fn parse(&self, text: &str) -> Result<String> {
            match text.strip_prefix('*').and_then(|t| t.strip_suffix('*')) {
                Some(inner) => Ok(format!("<p><em>{inner}</em></p>")),
                None => Err(anyhow::anyhow!("unsupported markup: {text}").into()),
            }
        }
    }

    #[test]
    fn test_dispatch_by_engine_name() {
        let mut set = FormatterSet::new();
        set.register(Emphasis);

        assert!(set.has("Markdown"));
        assert_eq!(set.parse("markdown", "*hi*").unwrap(), "<p><em>hi</em></p>");
    }

    #[test]
    fn test_engine_errors_pass_through() {
        let mut set = FormatterSet::new();
        set.register(Emphasis);

        let err = set.parse("markdown", "# title").unwrap_err();
        assert!(matches!(err, FormatError::Engine(_)));
        assert_eq!(err.to_string(), "unsupported markup: # title");
    }

    #[test]
    fn test_unregistered_engine() {
        let set = FormatterSet::new();
        assert!(matches!(
            set.parse(TEXTILE_ENGINE, "h1. Title").unwrap_err(),
            FormatError::EngineNotRegistered(name) if name == "textile"
        ));
    }
}
