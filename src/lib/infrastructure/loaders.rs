//! YAML recipient lists and frontmatter templates

mod frontmatter;
mod recipients;

pub use frontmatter::FrontmatterTemplateLoader;
pub use recipients::YamlRecipientLoader;
