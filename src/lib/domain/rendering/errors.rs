//! Rendering errors

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::domain::storage::StorageError;

/// Template text could not be parsed
#[derive(Debug, Error)]
#[error("template `{name}` is malformed: {message}")]
pub struct TemplateSyntaxError {
    /// The template's name
    pub name: String,

    /// What the parser rejected
    pub message: String,
}

/// A parsed template could not be rendered against its context
#[derive(Debug, Error)]
#[error("could not render template `{name}`: {message}")]
pub struct TemplateRenderError {
    /// The template's name
    pub name: String,

    /// What the engine reported
    pub message: String,
}

/// Content could not be converted to HTML
#[derive(Debug, Error)]
#[error("could not convert content to HTML: {0}")]
pub struct ConversionError(pub String);

/// Styles could not be inlined into the HTML document
#[derive(Debug, Error)]
#[error("could not inline styles: {0}")]
pub struct InliningError(pub String);

/// Errors that can abort a single render
#[derive(Debug, Error)]
pub enum RenderError {
    /// A body or layout template is malformed
    #[error(transparent)]
    Syntax(#[from] TemplateSyntaxError),

    /// Variable substitution failed
    #[error(transparent)]
    Template(#[from] TemplateRenderError),

    /// A layout file exists but could not be read
    #[error("could not read layout {}", .path.display())]
    LayoutRead {
        /// The layout path
        path: PathBuf,

        /// The underlying storage error
        #[source]
        source: StorageError,
    },

    /// Markup conversion failed
    #[error(transparent)]
    ContentConversion(#[from] ConversionError),

    /// Style inlining failed
    #[error(transparent)]
    Inlining(#[from] InliningError),
}

impl RenderError {
    /// Wraps a storage error raised while reading the layout at `path`
    pub fn layout_read(path: impl Into<PathBuf>, source: StorageError) -> Self {
        let path = path.into();

        debug!("StorageError -> RenderError::LayoutRead ({})", path.display());

        RenderError::LayoutRead { path, source }
    }
}
