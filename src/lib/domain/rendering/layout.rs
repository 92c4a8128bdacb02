//! Layout composition

use std::path::Path;

use tracing::debug;

use crate::domain::storage::Storage;

use super::{RenderContext, RenderError, TemplateEngine};

/// Wraps rendered content into an optional layout template
#[derive(Debug)]
pub struct LayoutComposer<'a, S: ?Sized, E> {
    storage: &'a S,
    engine: &'a E,
}

impl<'a, S, E> LayoutComposer<'a, S, E>
where
    S: Storage + ?Sized,
    E: TemplateEngine,
{
    /// Creates a composer reading layouts from `storage`
    pub fn new(storage: &'a S, engine: &'a E) -> Self {
        Self { storage, engine }
    }

    /// Wraps `content` in the layout at `layout_path`.
    ///
    /// A missing layout file (or a directory in its place) falls back to
    /// `default_layout`. When the layout text is empty the content is
    /// returned unchanged. Layouts are read and parsed on every call.
    ///
    /// # Errors
    /// - [`RenderError::LayoutRead`] if the layout exists but cannot be read.
    /// - [`RenderError::Syntax`] if the layout does not parse.
    /// - [`RenderError::Template`] if the layout does not render.
    pub fn compose(
        &self,
        content: String,
        layout_path: &Path,
        default_layout: &str,
        context: &RenderContext<'_>,
    ) -> Result<String, RenderError> {
        let layout = if self.storage.is_file(layout_path) {
            debug!(path = %layout_path.display(), "loading layout");

            self.storage
                .read_to_string(layout_path)
                .map_err(|e| RenderError::layout_read(layout_path, e))?
        } else {
            default_layout.to_string()
        };

        if layout.is_empty() {
            return Ok(content);
        }

        let template = self
            .engine
            .parse(&layout_path.display().to_string(), &layout)?;

        Ok(self.engine.render(&template, &context.with_content(content))?)
    }
}
