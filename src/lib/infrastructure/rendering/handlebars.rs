//! Handlebars template engine

use std::fmt;

use handlebars::Handlebars;

use crate::domain::rendering::{
    RenderContext, TemplateEngine, TemplateRenderError, TemplateSyntaxError,
};

/// A parsed Handlebars template.
///
/// Wraps a registry holding just this template, so rendering needs no
/// mutable state and can happen from several threads at once.
pub struct HandlebarsTemplate {
    name: String,
    registry: Handlebars<'static>,
}

impl fmt::Debug for HandlebarsTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Handlebars engine.
///
/// Placeholders address the context by name (`{{User.username}}`,
/// `{{Campaign.subject}}`, `{{Content}}`). Missing fields render as empty
/// text and output is never HTML-escaped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsEngine;

impl HandlebarsEngine {
    /// Creates a new engine
    pub fn new() -> Self {
        Self
    }

    fn registry() -> Handlebars<'static> {
        let mut registry = Handlebars::new();

        registry.set_strict_mode(false);
        registry.register_escape_fn(handlebars::no_escape);

        registry
    }
}

impl TemplateEngine for HandlebarsEngine {
    type Template = HandlebarsTemplate;

    fn parse(&self, name: &str, source: &str) -> Result<Self::Template, TemplateSyntaxError> {
        let mut registry = Self::registry();

        registry
            .register_template_string(name, source)
            .map_err(|e| TemplateSyntaxError {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(HandlebarsTemplate {
            name: name.to_string(),
            registry,
        })
    }

    fn render(
        &self,
        template: &Self::Template,
        context: &RenderContext<'_>,
    ) -> Result<String, TemplateRenderError> {
        template
            .registry
            .render(&template.name, context)
            .map_err(|e| TemplateRenderError {
                name: template.name.clone(),
                message: e.to_string(),
            })
    }
}
