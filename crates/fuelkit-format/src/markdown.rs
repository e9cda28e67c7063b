//! Markdown engine shim over pulldown-cmark.

use crate::engine::TextFormatter;
use crate::error::Result;
use pulldown_cmark::{Options, Parser, html};

/// Engine name [`MarkdownFormatter`] registers under.
pub const MARKDOWN_ENGINE: &str = "markdown";

/// Renders Markdown to HTML.
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    options: Options,
}

impl MarkdownFormatter {
    /// CommonMark without extensions.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    /// Enables pulldown-cmark extensions such as tables or strikethrough.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextFormatter for MarkdownFormatter {
    fn name(&self) -> &str {
        MARKDOWN_ENGINE
    }

    fn parse(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(text, self.options));
        Ok(out)
    }
}
