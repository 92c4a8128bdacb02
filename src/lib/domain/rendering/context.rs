//! Per-recipient render context

use serde::Serialize;

use crate::domain::campaigns::{CampaignMetadata, Recipient};

/// The values a template can reference.
///
/// Templates see the recipient as `User`, the campaign metadata as
/// `Campaign`, the stylesheet text as `CssContent` and, when rendering a
/// layout, the already rendered inner content as `Content`.
///
/// A body render must not see `Content`. A layout render sees everything the
/// body render saw plus `Content`; [`RenderContext::with_content`] preserves
/// the recipient and campaign fields so layouts can personalise too.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderContext<'a> {
    user: &'a Recipient,
    campaign: &'a CampaignMetadata,
    css_content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl<'a> RenderContext<'a> {
    /// Creates a body context for `user` within `campaign`
    pub fn new(user: &'a Recipient, campaign: &'a CampaignMetadata) -> Self {
        Self {
            user,
            campaign,
            css_content: String::new(),
            content: None,
        }
    }

    /// Sets the stylesheet text exposed as `CssContent`
    pub fn with_stylesheet(mut self, css: impl Into<String>) -> Self {
        self.css_content = css.into();
        self
    }

    /// Returns a layout context: a copy of this one with `Content` set
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..self.clone()
        }
    }

    /// The stylesheet text, empty when the campaign has none
    pub fn stylesheet(&self) -> &str {
        &self.css_content
    }

    /// The rendered inner content, only set for layout renders
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}
