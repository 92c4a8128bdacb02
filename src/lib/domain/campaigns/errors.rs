//! Campaign errors

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{
    rendering::{RenderError, TemplateSyntaxError},
    storage::StorageError,
};

use super::RenderStage;

/// Errors raised while splitting a template into metadata and body
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// The opening `---` has no closing delimiter
    #[error("frontmatter is missing its closing `---` delimiter")]
    Unterminated,

    /// The header is not a key/value mapping
    #[error("frontmatter must be a mapping")]
    NotAMapping,

    /// The header could not be parsed
    #[error("invalid frontmatter: {0}")]
    Invalid(String),
}

/// Errors raised while parsing a recipient list
#[derive(Debug, Error)]
pub enum RecipientListError {
    /// The document is not a list of mappings
    #[error("invalid recipient list: {0}")]
    Invalid(String),

    /// An entry has no email attribute
    #[error("recipient {index} has no email")]
    MissingEmail {
        /// Position of the entry in the list
        index: usize,
    },
}

/// Errors that can occur when loading a campaign.
///
/// Each variant carries the path of the resource that failed.
#[derive(Debug, Error)]
pub enum LoadCampaignError {
    /// The template file could not be read
    #[error("could not read template {}", .path.display())]
    TemplateRead {
        /// The template path
        path: PathBuf,

        /// The underlying storage error
        #[source]
        source: StorageError,
    },

    /// The template's metadata header could not be parsed
    #[error("could not parse template {}", .path.display())]
    TemplateParse {
        /// The template path
        path: PathBuf,

        /// The underlying parse error
        #[source]
        source: FrontmatterError,
    },

    /// The template body is not a valid template
    #[error("template {} has a syntax error", .path.display())]
    TemplateSyntax {
        /// The template path
        path: PathBuf,

        /// The underlying syntax error
        #[source]
        source: TemplateSyntaxError,
    },

    /// The recipient list could not be read
    #[error("could not read recipient list {}", .path.display())]
    RecipientRead {
        /// The list path
        path: PathBuf,

        /// The underlying storage error
        #[source]
        source: StorageError,
    },

    /// The recipient list could not be parsed
    #[error("could not parse recipient list {}", .path.display())]
    RecipientParse {
        /// The list path
        path: PathBuf,

        /// The underlying parse error
        #[source]
        source: RecipientListError,
    },
}

impl LoadCampaignError {
    /// The path of the resource that failed to load
    pub fn path(&self) -> &Path {
        match self {
            Self::TemplateRead { path, .. }
            | Self::TemplateParse { path, .. }
            | Self::TemplateSyntax { path, .. }
            | Self::RecipientRead { path, .. }
            | Self::RecipientParse { path, .. } => path,
        }
    }

    /// Returns `true` if the template, rather than the recipient list, failed
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            Self::TemplateRead { .. } | Self::TemplateParse { .. } | Self::TemplateSyntax { .. }
        )
    }
}

/// Errors that can occur when rendering one recipient's message
#[derive(Debug, Error)]
pub enum RenderMessageError {
    /// The recipient index is past the end of the list
    #[error("recipient index {index} is out of range for {len} recipients")]
    IndexOutOfRange {
        /// The requested index
        index: usize,

        /// The number of recipients
        len: usize,
    },

    /// A pipeline stage failed for this recipient
    #[error("recipient {index}: {stage} failed")]
    Render {
        /// The recipient index
        index: usize,

        /// The stage that failed
        stage: RenderStage,

        /// The underlying render error
        #[source]
        source: RenderError,
    },
}

impl RenderMessageError {
    /// The recipient index the error refers to
    pub fn index(&self) -> usize {
        match self {
            Self::IndexOutOfRange { index, .. } | Self::Render { index, .. } => *index,
        }
    }

    /// The failing stage, if the error came from the pipeline
    pub fn stage(&self) -> Option<RenderStage> {
        match self {
            Self::IndexOutOfRange { .. } => None,
            Self::Render { stage, .. } => Some(*stage),
        }
    }
}
