//! Campaign directories

use std::path::{Path, PathBuf};

use clap::Parser;

/// Where campaign templates, recipient lists and layouts live
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
pub struct CampaignConfig {
    /// Directory of content templates, `<id>.md`
    #[arg(long, env = "CONTENT_DIR", default_value = "content")]
    pub content_dir: PathBuf,

    /// Directory of recipient lists, `<id>.yml`
    #[arg(long, env = "LIST_DIR", default_value = "lists")]
    pub list_dir: PathBuf,

    /// Directory of layouts and the shared stylesheet
    #[arg(long, env = "LAYOUT_DIR", default_value = "layouts")]
    pub layout_dir: PathBuf,
}

impl CampaignConfig {
    /// File name of the plain-text layout
    pub const PLAIN_LAYOUT: &'static str = "_default.text";

    /// File name of the HTML layout
    pub const HTML_LAYOUT: &'static str = "_default.html";

    /// File name of the shared stylesheet
    pub const STYLESHEET: &'static str = "_default.css";

    /// Creates a configuration rooted at the given directories
    pub fn new(
        content_dir: impl Into<PathBuf>,
        list_dir: impl Into<PathBuf>,
        layout_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            content_dir: content_dir.into(),
            list_dir: list_dir.into(),
            layout_dir: layout_dir.into(),
        }
    }

    /// Path of the template with identifier `id`
    pub fn template_path(&self, id: &str) -> PathBuf {
        self.content_dir.join(format!("{id}.md"))
    }

    /// Path of the recipient list with identifier `id`
    pub fn list_path(&self, id: &str) -> PathBuf {
        self.list_dir.join(format!("{id}.yml"))
    }

    /// Path of the plain-text layout
    pub fn plain_layout_path(&self) -> PathBuf {
        self.layout(Self::PLAIN_LAYOUT)
    }

    /// Path of the HTML layout
    pub fn html_layout_path(&self) -> PathBuf {
        self.layout(Self::HTML_LAYOUT)
    }

    /// Path of the shared stylesheet
    pub fn stylesheet_path(&self) -> PathBuf {
        self.layout(Self::STYLESHEET)
    }

    fn layout(&self, name: impl AsRef<Path>) -> PathBuf {
        self.layout_dir.join(name)
    }
}
