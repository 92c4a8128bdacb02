//! Boundary parsers for template and recipient list documents

use std::fmt::Debug;

use super::{
    errors::{FrontmatterError, RecipientListError},
    CampaignMetadata, Recipient,
};

/// A template document split into its metadata header and body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTemplate {
    /// Fields from the metadata header
    pub metadata: CampaignMetadata,

    /// The raw, unrendered body
    pub body: String,
}

/// Parses template documents
pub trait TemplateLoader: Debug + Send + Sync {
    /// Splits `source` into metadata and body.
    fn parse(&self, source: &str) -> Result<ParsedTemplate, FrontmatterError>;
}

/// Parses recipient list documents
pub trait RecipientLoader: Debug + Send + Sync {
    /// Parses `source` into recipients, in document order.
    ///
    /// Every recipient must carry an email attribute.
    fn parse(&self, source: &[u8]) -> Result<Vec<Recipient>, RecipientListError>;
}
