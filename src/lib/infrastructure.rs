//! Concrete collaborators for the campaign domain

pub mod email;
pub mod loaders;
pub mod rendering;
pub mod storage;

use std::sync::Arc;

use crate::domain::campaigns::{CampaignConfig, CampaignService, HtmlPipeline, Loaders};

use self::{
    loaders::{FrontmatterTemplateLoader, YamlRecipientLoader},
    rendering::{CssInliner, HandlebarsEngine, MarkdownConverter},
    storage::LocalStorage,
};

/// Campaign service wired to the local filesystem and the default
/// Handlebars / Markdown / CSS inlining pipeline.
pub type LocalCampaignService = CampaignService<LocalStorage, HandlebarsEngine>;

/// Builds a [`LocalCampaignService`] for the directories in `config`.
pub fn local_campaign_service(config: CampaignConfig) -> LocalCampaignService {
    CampaignService::new(
        config,
        Arc::new(LocalStorage),
        Arc::new(HandlebarsEngine::new()),
        default_loaders(),
        default_html_pipeline(),
    )
}

/// YAML recipient lists and YAML-frontmatter templates.
pub fn default_loaders() -> Loaders {
    Loaders {
        templates: Arc::new(FrontmatterTemplateLoader),
        recipients: Arc::new(YamlRecipientLoader),
    }
}

/// Markdown conversion followed by CSS inlining.
pub fn default_html_pipeline() -> HtmlPipeline {
    HtmlPipeline {
        converter: Arc::new(MarkdownConverter::new()),
        inliner: Arc::new(CssInliner),
    }
}
