//! Loaded campaign

use std::path::{Path, PathBuf};

use super::{CampaignMetadata, Recipient};

/// A loaded campaign: parsed body template, metadata and recipients.
///
/// Immutable once loaded. `T` is the template engine's parsed template, so
/// the body is parsed exactly once and shared by every render.
#[derive(Debug)]
pub struct Campaign<T> {
    template_path: PathBuf,
    metadata: CampaignMetadata,
    body: T,
    recipients: Vec<Recipient>,
}

impl<T> Campaign<T> {
    /// Assembles a campaign from already parsed parts
    pub fn new(
        template_path: impl Into<PathBuf>,
        metadata: CampaignMetadata,
        body: T,
        recipients: Vec<Recipient>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            metadata,
            body,
            recipients,
        }
    }

    /// The template file the campaign was loaded from
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// The template's metadata
    pub fn metadata(&self) -> &CampaignMetadata {
        &self.metadata
    }

    /// The parsed body template
    pub fn body(&self) -> &T {
        &self.body
    }

    /// The recipient at `index`
    pub fn recipient(&self, index: usize) -> Option<&Recipient> {
        self.recipients.get(index)
    }

    /// The number of recipients
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    /// Returns `true` if there are no recipients
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
