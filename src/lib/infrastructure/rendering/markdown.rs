//! Markdown to HTML conversion

use pulldown_cmark::{html, Options, Parser};

use crate::domain::rendering::{ConversionError, MarkupConverter};

/// CommonMark converter with the usual extensions: tables, strikethrough,
/// footnotes and task lists
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConverter {
    options: Options,
}

impl MarkdownConverter {
    /// Creates a converter with the common extension set
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for MarkdownConverter {
    fn convert(&self, text: &str) -> Result<String, ConversionError> {
        let parser = Parser::new_ext(text, self.options);
        let mut buf = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut buf, parser);

        Ok(buf)
    }
}
