//! Rendering pipeline: variable substitution, markup conversion, layouts and
//! style inlining.
//!
//! The template engine, markup converter and style inliner are capabilities
//! the campaign service is handed at construction, so alternative
//! implementations can be swapped in without touching the orchestration.

use std::fmt::Debug;

#[cfg(test)]
use mockall::mock;

mod context;
mod layout;

pub mod errors;

pub use context::RenderContext;
pub use errors::{
    ConversionError, InliningError, RenderError, TemplateRenderError, TemplateSyntaxError,
};
pub use layout::LayoutComposer;

/// Variable substitution engine
pub trait TemplateEngine: Send + Sync + 'static {
    /// A parsed template, reusable across renders and threads
    type Template: Debug + Send + Sync;

    /// Parses `source` into a reusable template.
    ///
    /// # Arguments
    /// * `name` - A name identifying the template in error messages.
    /// * `source` - The raw template text.
    fn parse(&self, name: &str, source: &str) -> Result<Self::Template, TemplateSyntaxError>;

    /// Renders a parsed template against `context`.
    ///
    /// Fields missing from the context render as empty text.
    fn render(
        &self,
        template: &Self::Template,
        context: &RenderContext<'_>,
    ) -> Result<String, TemplateRenderError>;
}

/// Converts lightweight markup into an HTML fragment
pub trait MarkupConverter: Debug + Send + Sync {
    /// Converts `text` to HTML. The same input always yields the same output.
    fn convert(&self, text: &str) -> Result<String, ConversionError>;
}

/// Moves stylesheet rules into inline `style` attributes
pub trait StyleInliner: Debug + Send + Sync {
    /// Inlines the `<style>` blocks of `html`, plus the rules of `stylesheet`
    /// when it is not empty.
    fn inline(&self, html: &str, stylesheet: &str) -> Result<String, InliningError>;
}

#[cfg(test)]
mock! {
    pub MarkupConverter {}

    impl MarkupConverter for MarkupConverter {
        fn convert(&self, text: &str) -> Result<String, ConversionError>;
    }
}

#[cfg(test)]
mock! {
    pub StyleInliner {}

    impl StyleInliner for StyleInliner {
        fn inline(&self, html: &str, stylesheet: &str) -> Result<String, InliningError>;
    }
}

#[cfg(test)]
impl Debug for MockMarkupConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockMarkupConverter").finish_non_exhaustive()
    }
}

#[cfg(test)]
impl Debug for MockStyleInliner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockStyleInliner").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub mod tests {
    pub use super::{MockMarkupConverter, MockStyleInliner};
}
