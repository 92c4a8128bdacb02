//! Campaigns: one content template sent to an ordered list of recipients.

mod attributes;
mod campaign;
mod config;
mod dispatch;
mod loaders;
mod service;
mod value;

pub mod errors;

pub use attributes::{CampaignMetadata, Recipient};
pub use campaign::Campaign;
pub use config::CampaignConfig;
pub use dispatch::{dispatch, DispatchError, DispatchFailure, DispatchReport, FailurePolicy};
pub use errors::{FrontmatterError, LoadCampaignError, RecipientListError, RenderMessageError};
pub use loaders::{ParsedTemplate, RecipientLoader, TemplateLoader};
pub use service::{CampaignService, HtmlPipeline, Loaders, RenderStage, DEFAULT_HTML_LAYOUT};
pub use value::Value;
